// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! The three services wired together over real sockets

mod common;

use antiplag_core::application::gateway::GatewayService;
use antiplag_core::application::reports::ReportService;
use antiplag_core::application::works::WorkService;
use antiplag_core::domain::config::GatewayConfig;
use antiplag_core::infrastructure::repositories::{
    InMemoryReportRepository, InMemoryWorkRepository,
};
use antiplag_core::presentation::{analysis_api, gateway_api, storage_api};
use axum::http::StatusCode;
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

async fn spawn_storage() -> String {
    let service = WorkService::new(Arc::new(InMemoryWorkRepository::new()));
    common::spawn_router(storage_api::router(Arc::new(service))).await
}

async fn spawn_analysis() -> (String, Arc<ReportService>) {
    let service = Arc::new(ReportService::new(Arc::new(InMemoryReportRepository::new())));
    let url = common::spawn_router(analysis_api::router(service.clone())).await;
    (url, service)
}

fn gateway(storage_url: String, analysis_url: String) -> Router {
    let config = GatewayConfig {
        address: "127.0.0.1:0".to_string(),
        storage_base_url: storage_url,
        analysis_base_url: analysis_url,
        downstream_timeout: Duration::from_secs(2),
    };
    gateway_api::router(Arc::new(GatewayService::from_config(&config).unwrap()))
}

#[tokio::test]
async fn test_submit_then_read_composite_view() {
    let storage_url = spawn_storage().await;
    let (analysis_url, _) = spawn_analysis().await;
    let app = gateway(storage_url, analysis_url);

    let (status, created) = common::post_json(
        &app,
        "/works",
        &json!({"student": "frank", "task": "essay", "file_path": "/uploads/frank/essay.md"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let work_id = created["work"]["id"].as_i64().unwrap();
    assert_eq!(created["report"]["work_id"], work_id);
    assert_eq!(created["report"]["status"], "pending");

    let (status, view) = common::get(&app, &format!("/works/{work_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["work"], created["work"]);
    assert_eq!(view["report"], created["report"]);
    assert!(view.get("message").is_none());
}

#[tokio::test]
async fn test_finished_analysis_shows_in_composite_view() {
    let storage_url = spawn_storage().await;
    let (analysis_url, reports) = spawn_analysis().await;
    let app = gateway(storage_url, analysis_url);

    let (_, created) = common::post_json(
        &app,
        "/works",
        &json!({"student": "gina", "task": "hw1", "file_path": "/uploads/gina/hw1.py"}),
    )
    .await;
    let work_id = created["work"]["id"].as_i64().unwrap();

    reports
        .create_report(antiplag_core::NewReport {
            work_id,
            status: "done".to_string(),
            similarity: 71.5,
            details: "matches work 3".to_string(),
        })
        .await
        .unwrap();

    let (status, view) = common::get(&app, &format!("/works/{work_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["report"]["status"], "done");
    assert_eq!(view["report"]["similarity"], 71.5);
}

#[tokio::test]
async fn test_unknown_work_with_live_services_is_unavailable() {
    let storage_url = spawn_storage().await;
    let (analysis_url, _) = spawn_analysis().await;
    let app = gateway(storage_url, analysis_url);

    // Both owners answer 404, which the gateway counts as two failures
    let (status, body) = common::get(&app, "/works/77").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "storage and analysis services unavailable");
}

#[tokio::test]
async fn test_analysis_down_keeps_work_readable() {
    let storage_url = spawn_storage().await;
    let (analysis_url, _) = spawn_analysis().await;

    let (_, created) = common::post_json(
        &gateway(storage_url.clone(), analysis_url),
        "/works",
        &json!({"student": "hank", "task": "hw2", "file_path": "/uploads/hank/hw2.c"}),
    )
    .await;
    let work_id = created["work"]["id"].as_i64().unwrap();

    // Port 9 (discard) on loopback refuses connections
    let degraded = gateway(storage_url, "http://127.0.0.1:9".to_string());
    let (status, view) = common::get(&degraded, &format!("/works/{work_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["work"], created["work"]);
    assert_eq!(view["message"], "report service unavailable");
}
