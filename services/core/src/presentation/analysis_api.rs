// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Analysis (report service) HTTP API
//!
//! - `POST /reports` - 201 with the stored report
//! - `GET /reports/{id}` - 200 or 404
//! - `GET /reports/work/{work_id}` - latest report of a work, 200 or 404
//!
//! Served with a permissive CORS policy so browser dashboards can poll it.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, LINK};
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use super::middleware::with_service_layers;
use super::storage_api::parse_id;
use super::ApiError;
use crate::application::reports::ReportService;
use crate::domain::{NewReport, ReportRecord};

pub fn router(service: Arc<ReportService>) -> Router {
    let api = Router::new()
        .route("/reports", post(create_report))
        .route("/reports/{id}", get(get_report))
        .route("/reports/work/{work_id}", get(get_report_by_work_id))
        .with_state(service);

    with_service_layers(api, "analysis").layer(cors())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
        .expose_headers([LINK])
        .max_age(Duration::from_secs(300))
}

async fn create_report(
    State(service): State<Arc<ReportService>>,
    payload: Result<Json<NewReport>, JsonRejection>,
) -> Result<(StatusCode, Json<ReportRecord>), ApiError> {
    let Json(request) = payload?;
    let report = service.create_report(request).await?;
    Ok((StatusCode::CREATED, Json(report.to_record())))
}

async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<ReportRecord>, ApiError> {
    let id = parse_id(&id, "id")?;
    let report = service.get_report(id).await?;
    Ok(Json(report.to_record()))
}

async fn get_report_by_work_id(
    State(service): State<Arc<ReportService>>,
    Path(work_id): Path<String>,
) -> Result<Json<ReportRecord>, ApiError> {
    let work_id = parse_id(&work_id, "work_id")?;
    let report = service.get_report_by_work_id(work_id).await?;
    Ok(Json(report.to_record()))
}
