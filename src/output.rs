// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Outputs and failure reporting for the action host

use crate::error::Result;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;

const OUTPUT_FILE_VAR: &str = "GITHUB_OUTPUT";

/// Publish a named output.
///
/// Appends to the file named by `GITHUB_OUTPUT` when set, prints the value otherwise.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    match env::var_os(OUTPUT_FILE_VAR) {
        Some(path) if !path.is_empty() => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            write_output(&mut file, name, value)
        }
        _ => {
            println!("{}", value);
            Ok(())
        }
    }
}

/// Write a `name<<DELIMITER` record, picking a delimiter the value does not contain
pub fn write_output<W: Write>(writer: &mut W, name: &str, value: &str) -> Result<()> {
    let mut delimiter = format!("ghadelimiter_{}", std::process::id());
    while value.contains(&delimiter) || name.contains(&delimiter) {
        delimiter.push('_');
    }

    writeln!(writer, "{}<<{}\n{}\n{}", name, delimiter, value, delimiter)?;
    Ok(())
}

/// Report a failure as an `::error::` workflow command
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
