// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Layers every service router is wrapped in: request ids, request tracing
//! and panic recovery. Also the `/health` handler and the JSON 404 fallback.

use axum::extract::Request;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::ApiError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Add `/health`, the fallback and the common layers to a service router
pub fn with_service_layers(router: Router, service: &'static str) -> Router {
    router
        .route(
            "/health",
            get(move || async move { Json(json!({ "status": "healthy", "service": service })) }),
        )
        .fallback(|| async { ApiError::NotFound("route not found".to_string()) })
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(move |request: &Request| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http",
                service,
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
