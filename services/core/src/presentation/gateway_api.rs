// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Gateway HTTP API
//!
//! - `POST /works` - submit a work; 201 with `{work, report}`
//! - `GET /works/{id}` - composite view; 200 (possibly degraded) or 503

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use super::middleware::with_service_layers;
use super::ApiError;
use crate::application::gateway::GatewayService;
use crate::domain::{CompositeWorkView, NewWork};

pub fn router(service: Arc<GatewayService>) -> Router {
    let api = Router::new()
        .route("/works", post(create_work_and_report))
        .route("/works/{id}", get(get_composite_work))
        .with_state(service);

    with_service_layers(api, "gateway")
}

async fn create_work_and_report(
    State(service): State<Arc<GatewayService>>,
    payload: Result<Json<NewWork>, JsonRejection>,
) -> Result<(StatusCode, Json<CompositeWorkView>), ApiError> {
    let Json(request) = payload?;
    let view = service.create_work_and_report(request).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn get_composite_work(
    State(service): State<Arc<GatewayService>>,
    Path(id): Path<String>,
) -> Result<Json<CompositeWorkView>, ApiError> {
    let view = service.get_composite_work(&id).await?;
    Ok(Json(view))
}
