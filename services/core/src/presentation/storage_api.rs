// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Storage (work service) HTTP API
//!
//! - `POST /works` - 201 with the stored work
//! - `GET /works/{id}` - 200 with the work, 404 when absent

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use super::middleware::with_service_layers;
use super::ApiError;
use crate::application::works::WorkService;
use crate::domain::{NewWork, WorkRecord};

pub fn router(service: Arc<WorkService>) -> Router {
    let api = Router::new()
        .route("/works", post(create_work))
        .route("/works/{id}", get(get_work))
        .with_state(service);

    with_service_layers(api, "storage")
}

async fn create_work(
    State(service): State<Arc<WorkService>>,
    payload: Result<Json<NewWork>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkRecord>), ApiError> {
    let Json(request) = payload?;
    let work = service.create_work(request).await?;
    Ok((StatusCode::CREATED, Json(work.to_record())))
}

async fn get_work(
    State(service): State<Arc<WorkService>>,
    Path(id): Path<String>,
) -> Result<Json<WorkRecord>, ApiError> {
    let id = parse_id(&id, "id")?;
    let work = service.get_work(id).await?;
    Ok(Json(work.to_record()))
}

pub(crate) fn parse_id(raw: &str, name: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid {} parameter", name)))
}
