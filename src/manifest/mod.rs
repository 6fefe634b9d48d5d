// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Manifest building and parameter merging. Pure functions, no I/O.

pub mod builder;
pub mod merge;

pub use builder::{build_manifest, parse_parameters, parse_value_files};
pub use merge::merge_parameters;
