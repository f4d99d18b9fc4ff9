// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP Downstream Adapters
//!
//! `reqwest` implementations of the work/report service ports.
//!
//! # API Endpoints
//!
//! - `POST {storage}/works` - Create work (201)
//! - `GET {storage}/works/{id}` - Fetch work (200)
//! - `POST {analysis}/reports` - Create report (201)
//! - `GET {analysis}/reports/work/{work_id}` - Fetch report of a work (200)
//!
//! Both adapters share one `Client`, so connections are pooled across
//! requests and every call carries the same timeout. Nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::domain::downstream::{
    DownstreamError, ReportServiceClient, Upstream, WorkServiceClient,
};
use crate::domain::{NewReport, NewWork, ReportRecord, WorkRecord};

/// Build the HTTP client shared by all downstream adapters
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}

/// Work service adapter
#[derive(Debug, Clone)]
pub struct HttpWorkClient {
    client: Client,
    base_url: String,
}

impl HttpWorkClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base(base_url.into()),
        }
    }
}

#[async_trait]
impl WorkServiceClient for HttpWorkClient {
    async fn create_work(&self, work: &NewWork) -> Result<WorkRecord, DownstreamError> {
        let url = format!("{}/works", self.base_url);
        let request = self.client.post(&url).json(work);
        send_expecting(Upstream::Storage, request, StatusCode::CREATED).await
    }

    async fn get_work(&self, id: i64) -> Result<WorkRecord, DownstreamError> {
        let url = format!("{}/works/{}", self.base_url, id);
        let request = self.client.get(&url);
        send_expecting(Upstream::Storage, request, StatusCode::OK).await
    }
}

/// Report service adapter
#[derive(Debug, Clone)]
pub struct HttpReportClient {
    client: Client,
    base_url: String,
}

impl HttpReportClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_base(base_url.into()),
        }
    }
}

#[async_trait]
impl ReportServiceClient for HttpReportClient {
    async fn create_report(&self, report: &NewReport) -> Result<ReportRecord, DownstreamError> {
        let url = format!("{}/reports", self.base_url);
        let request = self.client.post(&url).json(report);
        send_expecting(Upstream::Analysis, request, StatusCode::CREATED).await
    }

    async fn get_report_by_work_id(&self, work_id: i64) -> Result<ReportRecord, DownstreamError> {
        let url = format!("{}/reports/work/{}", self.base_url, work_id);
        let request = self.client.get(&url);
        send_expecting(Upstream::Analysis, request, StatusCode::OK).await
    }
}

fn trim_base(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Send `request`, require exactly `expected`, and decode the JSON body
async fn send_expecting<T: DeserializeOwned>(
    service: Upstream,
    request: RequestBuilder,
    expected: StatusCode,
) -> Result<T, DownstreamError> {
    let response = request
        .send()
        .await
        .map_err(|e| classify(service, e))?;

    let status = response.status();
    if status != expected {
        // Drain the body so the connection can go back to the pool
        let body = response.text().await.unwrap_or_default();
        debug!(
            service = %service,
            status = status.as_u16(),
            body = %body.trim(),
            "Downstream answered with unexpected status"
        );
        return Err(DownstreamError::UnexpectedStatus {
            service,
            status: status.as_u16(),
        });
    }

    response.json::<T>().await.map_err(|e| classify(service, e))
}

fn classify(service: Upstream, err: reqwest::Error) -> DownstreamError {
    if err.is_timeout() {
        DownstreamError::Timeout { service }
    } else if err.is_decode() {
        DownstreamError::Decode {
            service,
            reason: err.to_string(),
        }
    } else {
        DownstreamError::Transport {
            service,
            reason: err.to_string(),
        }
    }
}
