// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Authenticated client for the controller's application REST API

use crate::constants::api;
use crate::error::{DeployError, Result};
use crate::types::ApplicationManifest;
use bytes::Bytes;
use http::{header, Method, Request, Response, StatusCode};
use serde_json::Value;
use tower::{BoxError, Service, ServiceExt};
use tracing::{debug, instrument};
use url::Url;

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    AlreadyAbsent,
}

/// Issues application requests over any `tower` HTTP service.
///
/// Non-2xx responses become [`DeployError::RemoteRequest`]; nothing is retried here.
#[derive(Clone)]
pub struct ApiGateway<S> {
    endpoint: Url,
    token: String,
    service: S,
}

impl<S> ApiGateway<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone,
{
    pub fn new(endpoint: Url, token: impl Into<String>, service: S) -> Result<Self> {
        if endpoint.cannot_be_a_base() {
            return Err(DeployError::Configuration(format!(
                "endpoint {} cannot be used as a base URL",
                endpoint
            )));
        }

        Ok(Self {
            endpoint,
            token: token.into(),
            service,
        })
    }

    /// Endpoint as configured, without a trailing slash
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str().trim_end_matches('/')
    }

    #[instrument(skip(self, manifest), fields(application = ?manifest.metadata.name))]
    pub async fn create_application(&self, manifest: &ApplicationManifest) -> Result<Value> {
        let url = self.applications_url(&[])?;
        let response = self.send(Method::POST, url, Some(manifest)).await?;
        decode(response)
    }

    #[instrument(skip(self))]
    pub async fn get_application(&self, name: &str) -> Result<Value> {
        let url = self.applications_url(&[name])?;
        let response = self.send(Method::GET, url, None).await?;
        decode(response)
    }

    /// Replace the whole application document
    #[instrument(skip(self, manifest))]
    pub async fn update_application(
        &self,
        name: &str,
        manifest: &ApplicationManifest,
    ) -> Result<Value> {
        let url = self.applications_url(&[name])?;
        let response = self.send(Method::PUT, url, Some(manifest)).await?;
        decode(response)
    }

    /// Delete the application, a missing application counts as deleted
    #[instrument(skip(self))]
    pub async fn delete_application(&self, name: &str) -> Result<Deletion> {
        let url = self.applications_url(&[name])?;
        match self.send(Method::DELETE, url, None).await {
            Ok(_) => Ok(Deletion::Deleted),
            Err(DeployError::RemoteRequest { status: 404, .. }) => {
                debug!("Application {} not found, nothing to delete", name);
                Ok(Deletion::AlreadyAbsent)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn sync_application(&self, name: &str) -> Result<Value> {
        let url = self.applications_url(&[name, api::SYNC])?;
        let response = self.send(Method::POST, url, None).await?;
        decode(response)
    }

    fn applications_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DeployError::Configuration(format!(
                    "endpoint {} cannot be used as a base URL",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .extend(api::APPLICATIONS)
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        manifest: Option<&ApplicationManifest>,
    ) -> Result<Response<Bytes>> {
        let builder = Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/json");

        let request = match manifest {
            Some(manifest) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Bytes::from(serde_json::to_vec(manifest)?))?,
            None => builder.body(Bytes::new())?,
        };

        debug!("{} {}", method, url);

        let response = self
            .service
            .clone()
            .oneshot(request)
            .await
            .map_err(DeployError::Transport)?;

        check_status(&method, &url, response)
    }
}

/// Pass 2xx responses through, turn anything else into a remote request error
fn check_status(method: &Method, url: &Url, response: Response<Bytes>) -> Result<Response<Bytes>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    debug!(
        "{} {} returned {}: {}",
        method,
        url,
        status,
        String::from_utf8_lossy(response.body())
    );

    Err(DeployError::RemoteRequest {
        method: method.to_string(),
        status: status.as_u16(),
        reason: reason_phrase(status),
        url: url.to_string(),
    })
}

/// Canonical phrase for the status code; the phrase the server sent is not kept
fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

fn decode(response: Response<Bytes>) -> Result<Value> {
    let body = response.into_body();
    if body.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&body)?)
}
