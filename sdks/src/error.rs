// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The gateway answered with a non-success status
    #[error("gateway returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }

    /// True for failures where the gateway could not reach a downstream
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::BAD_GATEWAY) | Some(StatusCode::SERVICE_UNAVAILABLE)
        )
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// `{"error": ...}` bodies yield their message; anything else is kept verbatim
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_field() {
        assert_eq!(
            error_message(r#"{"error":"invalid work id 'abc'"}"#),
            "invalid work id 'abc'"
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_upstream_statuses() {
        let err = ClientError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "storage and analysis services unavailable".to_string(),
        };
        assert!(err.is_upstream_unavailable());

        let err = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "bad".to_string(),
        };
        assert!(!err.is_upstream_unavailable());
    }
}
