// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{method} {url} failed: HTTP {status} {reason}")]
    RemoteRequest {
        method: String,
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Cannot merge parameters: {0}")]
    MergeBaseline(String),

    #[error(
        "Application '{application}' was synced but did not become Healthy after {max_retry} retries, inspect it at {endpoint}/applications/{application}"
    )]
    RetryExhausted {
        application: String,
        endpoint: String,
        max_retry: u32,
    },

    #[error("Transport error: {0}")]
    Transport(#[source] tower::BoxError),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to build request: {0}")]
    Http(#[from] http::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// True for failures below the HTTP layer (connection refused, reset, TLS).
    pub fn is_transport(&self) -> bool {
        matches!(self, DeployError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_exhausted_names_application_and_endpoint() {
        let err = DeployError::RetryExhausted {
            application: "foo".to_string(),
            endpoint: "https://argocd.example".to_string(),
            max_retry: 2,
        };

        let message = err.to_string();
        assert!(message.contains("'foo'"));
        assert!(message.contains("after 2 retries"));
        assert!(message.contains("https://argocd.example/applications/foo"));
    }

    #[test]
    fn test_remote_request_message() {
        let err = DeployError::RemoteRequest {
            method: "GET".to_string(),
            status: 403,
            reason: "Forbidden".to_string(),
            url: "https://argocd.example/api/v1/applications/foo".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "GET https://argocd.example/api/v1/applications/foo failed: HTTP 403 Forbidden"
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn test_is_transport() {
        let err = DeployError::Transport("connection reset".into());
        assert!(err.is_transport());
    }
}
