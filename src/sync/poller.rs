// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waits for a synced application to report a healthy state.

use crate::argocd::ApiGateway;
use crate::error::{DeployError, Result};
use crate::types::application::{health_status, is_healthy};
use bytes::Bytes;
use http::{Request, Response};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tower::{BoxError, Service};
use tracing::{info, instrument, warn};

/// How many times, and how often, to re-check application health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    max_retry: u32,
    remaining: u32,
    interval: Duration,
}

impl RetryBudget {
    pub fn new(max_retry: u32, interval: Duration) -> Self {
        Self {
            max_retry,
            remaining: max_retry,
            interval,
        }
    }

    pub fn max_retry(&self) -> u32 {
        self.max_retry
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The budget left after spending one retry, `None` once it is used up
    pub fn spend(self) -> Option<Self> {
        self.remaining.checked_sub(1).map(|remaining| Self {
            remaining,
            ..self
        })
    }
}

pub struct ConvergencePoller<'a, S> {
    gateway: &'a ApiGateway<S>,
}

impl<'a, S> ConvergencePoller<'a, S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone,
{
    pub fn new(gateway: &'a ApiGateway<S>) -> Self {
        Self { gateway }
    }

    /// Poll the application until it reports `Healthy` or the budget runs out.
    ///
    /// Returns the last observed application. Any non-healthy status counts as
    /// not converged yet. Transport failures spend a retry like an unhealthy
    /// poll does; error responses from the controller end the wait.
    #[instrument(skip(self, budget), fields(max_retry = budget.max_retry()))]
    pub async fn await_healthy(&self, name: &str, mut budget: RetryBudget) -> Result<Value> {
        loop {
            match self.gateway.get_application(name).await {
                Ok(application) if is_healthy(&application) => {
                    info!("Application {} is Healthy", name);
                    return Ok(application);
                }
                Ok(application) => {
                    info!(
                        "Application {} is {}, {} retries left",
                        name,
                        health_status(&application).unwrap_or("Unknown"),
                        budget.remaining()
                    );
                }
                Err(e) if e.is_transport() => {
                    warn!(
                        "Failed to poll application {}: {}, {} retries left",
                        name,
                        e,
                        budget.remaining()
                    );
                }
                Err(e) => return Err(e),
            }

            budget = match budget.spend() {
                Some(next) => next,
                None => {
                    return Err(DeployError::RetryExhausted {
                        application: name.to_string(),
                        endpoint: self.gateway.endpoint().to_string(),
                        max_retry: budget.max_retry(),
                    })
                }
            };

            sleep(budget.interval()).await;
        }
    }
}
