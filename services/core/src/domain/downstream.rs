// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Downstream Service Ports
//!
//! The gateway only knows the work and report services through these traits.
//! HTTP adapters live in `infrastructure::downstream`; tests substitute
//! in-process fakes.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use super::{NewReport, NewWork, ReportRecord, WorkRecord};

/// Which downstream service a call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Storage,
    Analysis,
}

impl Upstream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Upstream::Storage => "storage",
            Upstream::Analysis => "analysis",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait WorkServiceClient: Send + Sync {
    /// `POST /works`, expecting 201
    async fn create_work(&self, work: &NewWork) -> Result<WorkRecord, DownstreamError>;

    /// `GET /works/{id}`, expecting 200
    async fn get_work(&self, id: i64) -> Result<WorkRecord, DownstreamError>;
}

#[async_trait]
pub trait ReportServiceClient: Send + Sync {
    /// `POST /reports`, expecting 201
    async fn create_report(&self, report: &NewReport) -> Result<ReportRecord, DownstreamError>;

    /// `GET /reports/work/{work_id}`, expecting 200
    async fn get_report_by_work_id(&self, work_id: i64) -> Result<ReportRecord, DownstreamError>;
}

/// Failure of a single downstream call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DownstreamError {
    #[error("{service} service did not answer in time")]
    Timeout { service: Upstream },

    #[error("{service} service unreachable: {reason}")]
    Transport { service: Upstream, reason: String },

    #[error("{service} service returned unexpected status {status}")]
    UnexpectedStatus { service: Upstream, status: u16 },

    #[error("{service} service returned a malformed body: {reason}")]
    Decode { service: Upstream, reason: String },
}

impl DownstreamError {
    pub fn service(&self) -> Upstream {
        match self {
            DownstreamError::Timeout { service }
            | DownstreamError::Transport { service, .. }
            | DownstreamError::UnexpectedStatus { service, .. }
            | DownstreamError::Decode { service, .. } => *service,
        }
    }

    /// HTTP status the downstream answered with, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            DownstreamError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
