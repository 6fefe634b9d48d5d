// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Input names as passed by the action host (read from `INPUT_<NAME>`)
pub mod inputs {
    pub const TOKEN: &str = "argocdToken";
    pub const ENDPOINT: &str = "argocdEndpoint";
    pub const APPLICATION_NAME: &str = "applicationName";
    pub const ACTION: &str = "actionName";
    pub const APPLICATION_NAMESPACE: &str = "applicationNamespace";
    pub const DEST_NAMESPACE: &str = "destNamespace";
    pub const PROJECT: &str = "applicationProject";
    pub const CHART_NAME: &str = "helmChartName";
    pub const CHART_VERSION: &str = "helmChartVersion";
    pub const REPO_URL: &str = "helmRepoUrl";
    pub const DEST_CLUSTER: &str = "destClusterName";
    pub const PARAMS: &str = "applicationParams";
    pub const VALUE_FILES: &str = "valueFiles";
    pub const DO_SYNC: &str = "doSync";
    pub const ONLY_SYNC: &str = "onlySync";
    pub const PRESERVE_PARAMS: &str = "preserveParams";
    pub const MAX_RETRY: &str = "maxRetry";
    pub const POLL_INTERVAL: &str = "tts";
}

pub mod defaults {
    /// Used for both the bookkeeping and the destination namespace
    pub const NAMESPACE: &str = "default";
    pub const PROJECT: &str = "default";
    pub const MAX_RETRY: u32 = 5;
    pub const POLL_INTERVAL_SECS: u64 = 10;
}

/// Controller REST API paths
pub mod api {
    pub const APPLICATIONS: [&str; 3] = ["api", "v1", "applications"];
    pub const SYNC: &str = "sync";
}

/// The only health status treated as converged
pub const HEALTHY: &str = "Healthy";

/// Name of the output carrying the observed application
pub const OUTPUT_NAME: &str = "application";

/// Separator for parameter and value-file lists
pub const LIST_SEPARATOR: char = ';';
