// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking controller API responses.

use crate::argocd::ApiGateway;
use bytes::Bytes;
use http::{header, Request, Response};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;
use url::Url;

pub const TEST_ENDPOINT: &str = "https://argocd.example";
pub const TEST_TOKEN: &str = "test-token";

type Key = (String, String);

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// A mock HTTP service that returns predefined responses based on method and path.
///
/// Responses registered for the same route are served in order; the last one
/// keeps being served once the queue is down to it.
#[derive(Clone, Default)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<Key, VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Build a gateway talking to this mock
    pub fn into_gateway(self) -> ApiGateway<MockService> {
        ApiGateway::new(Url::parse(TEST_ENDPOINT).unwrap(), TEST_TOKEN, self).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received for a method and path
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;

        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Service<Request<Bytes>> for MockService {
    type Response = Response<Bytes>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Bytes>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let header_value = |name: header::HeaderName| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let recorded = RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body: req.body().clone(),
        };
        self.requests.lock().unwrap().push(recorded);

        let response = self.next_response(&method, &path);

        Box::pin(async move {
            // Unmatched routes answer like the controller does for unknown applications
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("unknown")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Bytes::from(body))
                .unwrap())
        })
    }
}

/// Create a mock application JSON response
pub fn application_json(name: &str, health: &str, parameters: &[(&str, &str)]) -> String {
    let parameters: Vec<serde_json::Value> = parameters
        .iter()
        .map(|(name, value)| serde_json::json!({"name": name, "value": value}))
        .collect();

    serde_json::json!({
        "metadata": {
            "name": name,
            "namespace": "default",
            "resourceVersion": "12345"
        },
        "spec": {
            "source": {
                "repoURL": "https://charts.example/",
                "targetRevision": "1.2.3",
                "chart": "nginx",
                "helm": {"parameters": parameters}
            },
            "destination": {"name": "prod", "namespace": "default"},
            "project": "default"
        },
        "status": {
            "health": {"status": health},
            "sync": {"status": "Synced"}
        }
    })
    .to_string()
}

/// Create a controller "not found" error response
pub fn not_found_json(name: &str) -> String {
    serde_json::json!({
        "error": format!("applications.argoproj.io \"{}\" not found", name),
        "code": 5,
        "message": format!("applications.argoproj.io \"{}\" not found", name)
    })
    .to_string()
}
