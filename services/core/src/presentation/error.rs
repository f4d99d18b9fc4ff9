// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP error mapping shared by all three services

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::application::gateway::GatewayError;
use crate::application::ServiceError;

#[derive(Debug)]
pub enum ApiError {
    InvalidRequest(String),
    NotFound(String),
    UpstreamUnavailable(String),
    BothUpstreamsUnavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::BothUpstreamsUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidRequest(msg) => ApiError::InvalidRequest(msg),
            e @ GatewayError::UpstreamUnavailable { .. } => {
                ApiError::UpstreamUnavailable(e.to_string())
            }
            e @ GatewayError::BothUpstreamsUnavailable { .. } => {
                ApiError::BothUpstreamsUnavailable(e.to_string())
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => ApiError::InvalidRequest(e.to_string()),
            ServiceError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            ServiceError::Repository(e) => {
                tracing::error!(error = %e, "Repository failure");
                ApiError::Internal("internal server error".to_string())
            }
        }
    }
}

pub const JSON_CONTENT_TYPE_REQUIRED: &str = "content-type must be application/json";

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::InvalidRequest(JSON_CONTENT_TYPE_REQUIRED.to_string())
            }
            other => ApiError::InvalidRequest(format!("invalid json: {}", other.body_text())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::InvalidRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::UpstreamUnavailable(msg)
            | ApiError::BothUpstreamsUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
