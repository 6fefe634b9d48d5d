// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Parameter merging for the update path

use crate::error::{DeployError, Result};
use crate::types::HelmParameter;
use std::collections::HashMap;

/// Merge freshly built parameters with the ones observed on the controller.
///
/// Names present in both take the observed value, names only in `fresh` pass
/// through unchanged. The result has exactly the names of `fresh`, in order.
pub fn merge_parameters(
    fresh: Vec<HelmParameter>,
    observed: &[HelmParameter],
) -> Result<Vec<HelmParameter>> {
    if observed.is_empty() {
        return Err(DeployError::MergeBaseline(
            "no observed parameters to preserve".to_string(),
        ));
    }

    let observed: HashMap<&str, &str> = observed
        .iter()
        .map(|p| (p.name.as_str(), p.value.as_str()))
        .collect();

    Ok(fresh
        .into_iter()
        .map(|p| match observed.get(p.name.as_str()) {
            Some(value) => HelmParameter::new(p.name, *value),
            None => p,
        })
        .collect())
}
