// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Aggregation Gateway
//!
//! Composes the work and report services into two client operations.
//!
//! # Operations
//!
//! - **create_work_and_report**: create the work, then file a pending report
//!   for it. Sequential because the report needs the new work id. A failed
//!   report call leaves the work in place; there is no compensation.
//! - **get_composite_work**: fetch the work and its report concurrently and
//!   merge them. Losing one side degrades the answer, losing both fails it.
//!
//! No retries anywhere. Every downstream call is bounded by the client timeout.

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::config::GatewayConfig;
use crate::domain::downstream::{
    DownstreamError, ReportServiceClient, Upstream, WorkServiceClient,
};
use crate::domain::{CompositeWorkView, NewReport, NewWork};
use crate::infrastructure::downstream::{build_http_client, HttpReportClient, HttpWorkClient};

/// Errors surfaced to gateway clients
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{service} service unavailable")]
    UpstreamUnavailable {
        service: Upstream,
        #[source]
        source: DownstreamError,
    },

    #[error("storage and analysis services unavailable")]
    BothUpstreamsUnavailable {
        work: DownstreamError,
        report: DownstreamError,
    },
}

pub struct GatewayService {
    works: Arc<dyn WorkServiceClient>,
    reports: Arc<dyn ReportServiceClient>,
}

impl GatewayService {
    pub fn new(works: Arc<dyn WorkServiceClient>, reports: Arc<dyn ReportServiceClient>) -> Self {
        Self { works, reports }
    }

    /// Wire HTTP adapters for both services over one shared client
    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        let client = build_http_client(config.downstream_timeout)?;
        let works = HttpWorkClient::new(client.clone(), config.storage_base_url.clone());
        let reports = HttpReportClient::new(client, config.analysis_base_url.clone());
        Ok(Self::new(Arc::new(works), Arc::new(reports)))
    }

    /// Create a work and its pending report
    pub async fn create_work_and_report(
        &self,
        request: NewWork,
    ) -> Result<CompositeWorkView, GatewayError> {
        request
            .validate()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

        let work = self.works.create_work(&request).await.map_err(|e| {
            log_downstream_failure("create_work_and_report", &e);
            GatewayError::UpstreamUnavailable {
                service: Upstream::Storage,
                source: e,
            }
        })?;

        let report = self
            .reports
            .create_report(&NewReport::pending_for(work.id))
            .await
            .map_err(|e| {
                log_downstream_failure("create_work_and_report", &e);
                warn!(work_id = work.id, "Work created without a pending report");
                GatewayError::UpstreamUnavailable {
                    service: Upstream::Analysis,
                    source: e,
                }
            })?;

        info!(work_id = work.id, report_id = report.id, "Work submitted");
        Ok(CompositeWorkView::complete(work, report))
    }

    /// Fetch a work and its report, degrading when one side is unavailable
    pub async fn get_composite_work(&self, raw_id: &str) -> Result<CompositeWorkView, GatewayError> {
        let id = parse_work_id(raw_id)?;

        let (work, report) = tokio::join!(
            self.works.get_work(id),
            self.reports.get_report_by_work_id(id),
        );

        match (work, report) {
            (Ok(work), Ok(report)) => Ok(CompositeWorkView::complete(work, report)),
            (Ok(work), Err(e)) => {
                log_downstream_failure("get_composite_work", &e);
                warn!(work_id = id, "Returning work without report");
                Ok(CompositeWorkView::work_only(work))
            }
            (Err(e), Ok(report)) => {
                log_downstream_failure("get_composite_work", &e);
                warn!(work_id = id, "Returning report without work");
                Ok(CompositeWorkView::report_only(report))
            }
            (Err(work_err), Err(report_err)) => {
                log_downstream_failure("get_composite_work", &work_err);
                log_downstream_failure("get_composite_work", &report_err);
                Err(GatewayError::BothUpstreamsUnavailable {
                    work: work_err,
                    report: report_err,
                })
            }
        }
    }
}

/// Work ids are positive integers
pub fn parse_work_id(raw: &str) -> Result<i64, GatewayError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(GatewayError::InvalidRequest(format!(
            "invalid work id '{}'",
            raw
        ))),
    }
}

fn log_downstream_failure(operation: &'static str, err: &DownstreamError) {
    match err {
        // A missing report is routine for freshly created works
        e if e.is_not_found() => warn!(
            operation,
            service = %err.service(),
            status = 404,
            "Downstream resource not found"
        ),
        _ => error!(
            operation,
            service = %err.service(),
            status = ?err.status(),
            error = %err,
            "Downstream call failed"
        ),
    }
}
