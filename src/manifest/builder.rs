// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builds application manifests from the desired state

use crate::constants::{defaults, LIST_SEPARATOR};
use crate::types::{
    ApplicationDestination, ApplicationManifest, ApplicationSource, ApplicationSpec, DesiredState,
    HelmParameter, HelmSource, SyncPolicy,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Build a fresh manifest for the desired state
pub fn build_manifest(state: &DesiredState) -> ApplicationManifest {
    ApplicationManifest {
        metadata: ObjectMeta {
            name: Some(state.application_name.clone()),
            namespace: Some(or_default(&state.application_namespace, defaults::NAMESPACE)),
            ..Default::default()
        },
        spec: ApplicationSpec {
            source: ApplicationSource {
                repo_url: state.helm_repo_url.clone(),
                target_revision: state.helm_chart_version.clone(),
                chart: state.helm_chart_name.clone(),
                helm: HelmSource {
                    parameters: parse_parameters(&state.application_params),
                    value_files: parse_value_files(&state.value_files),
                },
            },
            destination: ApplicationDestination {
                name: state.dest_cluster_name.clone(),
                namespace: or_default(&state.dest_namespace, defaults::NAMESPACE),
            },
            project: or_default(&state.project, defaults::PROJECT),
            sync_policy: SyncPolicy::default(),
        },
    }
}

/// Parse a `name=value;name=value` list into helm parameters.
///
/// Each segment is split on its first `=`; a segment without one gets an
/// empty value. Empty segments are skipped. Every other segment yields one
/// parameter in input order, so a repeated name keeps all its entries and
/// the last one wins when helm applies them.
pub fn parse_parameters(params: &str) -> Vec<HelmParameter> {
    params
        .split(LIST_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(|segment| {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            HelmParameter::new(name, value)
        })
        .collect()
}

/// Parse a `;`-separated list of value files, `None` when there are none
pub fn parse_value_files(value_files: &str) -> Option<Vec<String>> {
    let files: Vec<String> = value_files
        .split(LIST_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    (!files.is_empty()).then_some(files)
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
