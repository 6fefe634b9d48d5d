// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{inputs, HEALTHY};
use crate::error::{DeployError, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Desired state of an application, as configured by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredState {
    pub application_name: String,
    /// Namespace the controller keeps its Application record in
    pub application_namespace: String,
    pub dest_cluster_name: String,
    /// Namespace the workload is deployed to
    pub dest_namespace: String,
    pub project: String,
    pub helm_chart_name: String,
    pub helm_repo_url: String,
    pub helm_chart_version: String,
    pub application_params: String,
    pub value_files: String,
}

impl DesiredState {
    /// Check the inputs a create or update needs to produce a usable manifest
    pub fn validate_for_write(&self) -> Result<()> {
        let required = [
            (inputs::CHART_NAME, &self.helm_chart_name),
            (inputs::CHART_VERSION, &self.helm_chart_version),
            (inputs::REPO_URL, &self.helm_repo_url),
            (inputs::DEST_CLUSTER, &self.dest_cluster_name),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(DeployError::Configuration(format!(
                "missing required input(s) for application '{}': {}",
                self.application_name,
                missing.join(", ")
            )));
        }

        if self.application_params.is_empty() && self.value_files.is_empty() {
            return Err(DeployError::Configuration(format!(
                "application '{}' needs {} or {}",
                self.application_name,
                inputs::PARAMS,
                inputs::VALUE_FILES
            )));
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HelmParameter {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl HelmParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Declarative application document sent to the controller
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApplicationManifest {
    pub metadata: ObjectMeta,
    pub spec: ApplicationSpec,
}

impl ApplicationManifest {
    /// Return a copy of this manifest carrying the given helm parameters
    pub fn with_parameters(self, parameters: Vec<HelmParameter>) -> Self {
        let ApplicationManifest { metadata, spec } = self;
        ApplicationManifest {
            metadata,
            spec: ApplicationSpec {
                source: ApplicationSource {
                    helm: HelmSource {
                        parameters,
                        ..spec.source.helm
                    },
                    ..spec.source
                },
                ..spec
            },
        }
    }

    pub fn parameters(&self) -> &[HelmParameter] {
        &self.spec.source.helm.parameters
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    pub source: ApplicationSource,
    pub destination: ApplicationDestination,
    pub project: String,
    pub sync_policy: SyncPolicy,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSource {
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    pub target_revision: String,
    pub chart: String,
    pub helm: HelmSource,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HelmSource {
    pub parameters: Vec<HelmParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_files: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ApplicationDestination {
    pub name: String,
    pub namespace: String,
}

/// Always empty: syncs are triggered explicitly, never automated
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncPolicy {}

/// Get the health status the controller reports for an observed application
pub fn health_status(application: &Value) -> Option<&str> {
    application
        .pointer("/status/health/status")
        .and_then(Value::as_str)
}

/// Check if an observed application reports the converged health status
pub fn is_healthy(application: &Value) -> bool {
    health_status(application) == Some(HEALTHY)
}

/// Get the helm parameters currently set on an observed application.
///
/// An absent, malformed or empty parameter list leaves nothing to preserve
/// and is reported as a merge baseline error.
pub fn observed_parameters(application: &Value) -> Result<Vec<HelmParameter>> {
    let name = application
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let Some(raw) = application.pointer("/spec/source/helm/parameters") else {
        return Err(DeployError::MergeBaseline(format!(
            "application '{}' has no helm parameters",
            name
        )));
    };

    let parameters: Vec<HelmParameter> = serde_json::from_value(raw.clone()).map_err(|e| {
        DeployError::MergeBaseline(format!(
            "application '{}' has malformed helm parameters: {}",
            name, e
        ))
    })?;

    if parameters.is_empty() {
        return Err(DeployError::MergeBaseline(format!(
            "application '{}' has an empty helm parameter list",
            name
        )));
    }

    Ok(parameters)
}
