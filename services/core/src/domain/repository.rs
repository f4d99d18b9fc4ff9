// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository abstractions for the storage and analysis services.

use async_trait::async_trait;

use super::{NewReport, NewWork, Report, Work};

#[async_trait]
pub trait WorkRepository: Send + Sync {
    /// Insert a work; the repository assigns `id` and `uploaded_at`.
    async fn create(&self, work: NewWork) -> Result<Work, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Work>, RepositoryError>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert a report; the repository assigns `id` and `created_at`.
    async fn create(&self, report: NewReport) -> Result<Report, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>, RepositoryError>;

    /// Latest report filed for a work.
    async fn find_by_work_id(&self, work_id: i64) -> Result<Option<Report>, RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}
