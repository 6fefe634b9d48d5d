// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{defaults, inputs};
use crate::error::{DeployError, Result};
use crate::sync::RetryBudget;
use crate::types::DesiredState;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// What to do with the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    /// Skip the manifest action and only trigger a sync
    Sync,
}

impl FromStr for Action {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Action::Create),
            "read" | "get" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "sync" => Ok(Action::Sync),
            other => Err(DeployError::Configuration(format!(
                "{} does not exist in (create, get|read, update, delete, sync)",
                other
            ))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Sync => "sync",
        };
        f.write_str(name)
    }
}

/// Deployment configuration loaded from action inputs
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub endpoint: Url,
    pub action: Action,
    pub desired_state: DesiredState,
    /// Trigger a sync after create/update and wait for it to converge
    pub do_sync: bool,
    /// On update, keep the observed values of parameters that are set again
    pub preserve_params: bool,
    pub retry_budget: RetryBudget,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("action", &self.action)
            .field("desired_state", &self.desired_state)
            .field("do_sync", &self.do_sync)
            .field("preserve_params", &self.preserve_params)
            .field("retry_budget", &self.retry_budget)
            .finish()
    }
}

impl Config {
    /// Load configuration from the `INPUT_*` environment variables set by the action host
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(input_env_var(name)).ok())
    }

    /// Load configuration through `lookup`, which maps an input name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty inputs are treated as unset
        let optional = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &str| {
            optional(name).ok_or_else(|| {
                DeployError::Configuration(format!("input required and not supplied: {}", name))
            })
        };
        let flag = |name: &str, default: bool| {
            optional(name).map_or(Ok(default), |v| parse_bool(name, &v))
        };

        let token = required(inputs::TOKEN)?;
        let endpoint = parse_endpoint(&required(inputs::ENDPOINT)?)?;
        let application_name = required(inputs::APPLICATION_NAME)?;

        let action = if flag(inputs::ONLY_SYNC, false)? {
            Action::Sync
        } else {
            optional(inputs::ACTION)
                .as_deref()
                .unwrap_or("create")
                .parse::<Action>()?
        };

        let max_retry = optional(inputs::MAX_RETRY)
            .map_or(Ok(defaults::MAX_RETRY), |v| parse_number(inputs::MAX_RETRY, &v))?;
        let interval_secs: u64 = optional(inputs::POLL_INTERVAL).map_or(
            Ok(defaults::POLL_INTERVAL_SECS),
            |v| parse_number(inputs::POLL_INTERVAL, &v),
        )?;
        if interval_secs == 0 {
            return Err(DeployError::Configuration(format!(
                "{} must be a positive number of seconds",
                inputs::POLL_INTERVAL
            )));
        }

        let desired_state = DesiredState {
            application_name,
            application_namespace: optional(inputs::APPLICATION_NAMESPACE).unwrap_or_default(),
            dest_cluster_name: optional(inputs::DEST_CLUSTER).unwrap_or_default(),
            dest_namespace: optional(inputs::DEST_NAMESPACE).unwrap_or_default(),
            project: optional(inputs::PROJECT).unwrap_or_default(),
            helm_chart_name: optional(inputs::CHART_NAME).unwrap_or_default(),
            helm_repo_url: optional(inputs::REPO_URL).unwrap_or_default(),
            helm_chart_version: optional(inputs::CHART_VERSION).unwrap_or_default(),
            application_params: optional(inputs::PARAMS).unwrap_or_default(),
            value_files: optional(inputs::VALUE_FILES).unwrap_or_default(),
        };

        Ok(Config {
            token,
            endpoint,
            action,
            desired_state,
            do_sync: flag(inputs::DO_SYNC, false)?,
            preserve_params: flag(inputs::PRESERVE_PARAMS, true)?,
            retry_budget: RetryBudget::new(max_retry, Duration::from_secs(interval_secs)),
        })
    }
}

/// Environment variable carrying an action input: `INPUT_` + upper-cased name
pub fn input_env_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Parse a boolean input the way action hosts accept them
pub fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(DeployError::Configuration(format!(
            "input {} is not a boolean (true|True|TRUE|false|False|FALSE): {}",
            name, other
        ))),
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        DeployError::Configuration(format!(
            "input {} is not a non-negative integer: {}",
            name, value
        ))
    })
}

fn parse_endpoint(value: &str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| {
        DeployError::Configuration(format!("invalid {} {}: {}", inputs::ENDPOINT, value, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(DeployError::Configuration(format!(
            "{} must be an http(s) URL: {}",
            inputs::ENDPOINT,
            value
        )));
    }

    Ok(url)
}
