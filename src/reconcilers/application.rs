// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Application reconciler - runs the configured action against the controller.

use crate::argocd::{ApiGateway, Deletion};
use crate::config::{Action, Config};
use crate::error::Result;
use crate::manifest::{build_manifest, merge_parameters};
use crate::sync::ConvergencePoller;
use crate::types::application::observed_parameters;
use bytes::Bytes;
use http::{Request, Response};
use serde_json::{json, Value};
use tower::{BoxError, Service};
use tracing::{debug, info, instrument};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The application as last observed on the controller
    Application(Value),
    Deleted,
}

impl Outcome {
    /// JSON published as the run's output
    pub fn to_output(&self) -> Value {
        match self {
            Outcome::Application(application) => application.clone(),
            Outcome::Deleted => json!({ "deleted": true }),
        }
    }
}

pub struct ApplicationReconciler<S> {
    gateway: ApiGateway<S>,
    config: Config,
}

impl<S> ApplicationReconciler<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone,
{
    pub fn new(gateway: ApiGateway<S>, config: Config) -> Self {
        Self { gateway, config }
    }

    /// Run the configured action, syncing afterwards when requested
    #[instrument(
        skip(self),
        fields(
            application = %self.config.desired_state.application_name,
            action = %self.config.action
        )
    )]
    pub async fn run(&self) -> Result<Outcome> {
        let action = self.config.action;

        if self.config.do_sync && matches!(action, Action::Read | Action::Delete) {
            debug!("Ignoring doSync for {} action", action);
        }

        match action {
            Action::Create => {
                let application = self.create().await?;
                self.sync_if_requested(application).await
            }
            Action::Update => {
                let application = self.update().await?;
                self.sync_if_requested(application).await
            }
            Action::Read => self.read().await.map(Outcome::Application),
            Action::Delete => self.delete().await,
            Action::Sync => self.sync_and_wait().await.map(Outcome::Application),
        }
    }

    async fn create(&self) -> Result<Value> {
        let state = &self.config.desired_state;
        state.validate_for_write()?;

        let manifest = build_manifest(state);
        info!(
            "Creating application {} from chart {}@{}",
            state.application_name, state.helm_chart_name, state.helm_chart_version
        );

        self.gateway.create_application(&manifest).await
    }

    async fn read(&self) -> Result<Value> {
        let name = &self.config.desired_state.application_name;
        info!("Reading application {}", name);
        self.gateway.get_application(name).await
    }

    /// Fetch the current parameters, merge them into a fresh manifest and replace the application
    async fn update(&self) -> Result<Value> {
        let state = &self.config.desired_state;
        state.validate_for_write()?;

        let fresh = build_manifest(state);
        let manifest = if self.config.preserve_params {
            let observed = self.gateway.get_application(&state.application_name).await?;
            let observed = observed_parameters(&observed)?;
            let merged = merge_parameters(fresh.parameters().to_vec(), &observed)?;
            debug!("Merged {} parameters with observed values", merged.len());
            fresh.with_parameters(merged)
        } else {
            fresh
        };

        info!(
            "Updating application {} to chart {}@{}",
            state.application_name, state.helm_chart_name, state.helm_chart_version
        );

        self.gateway
            .update_application(&state.application_name, &manifest)
            .await
    }

    async fn delete(&self) -> Result<Outcome> {
        let name = &self.config.desired_state.application_name;
        info!("Deleting application {}", name);

        match self.gateway.delete_application(name).await? {
            Deletion::Deleted => info!("Application {} deleted", name),
            Deletion::AlreadyAbsent => info!("Application {} was already absent", name),
        }

        Ok(Outcome::Deleted)
    }

    async fn sync_if_requested(&self, application: Value) -> Result<Outcome> {
        if !self.config.do_sync {
            return Ok(Outcome::Application(application));
        }
        self.sync_and_wait().await.map(Outcome::Application)
    }

    async fn sync_and_wait(&self) -> Result<Value> {
        let name = &self.config.desired_state.application_name;
        info!("Triggering sync of application {}", name);
        self.gateway.sync_application(name).await?;

        ConvergencePoller::new(&self.gateway)
            .await_healthy(name, self.config.retry_budget)
            .await
    }
}
