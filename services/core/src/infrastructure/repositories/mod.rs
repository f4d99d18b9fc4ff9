// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! ## PostgreSQL Repositories
//! - **PostgresWorkRepository** - `works` table
//! - **PostgresReportRepository** - `reports` table
//!
//! ## In-Memory Repositories
//! Used when no DSN is configured and in tests:
//! - **InMemoryWorkRepository**
//! - **InMemoryReportRepository**
//!
//! Every operation is a single INSERT or SELECT; nothing is transactional.

pub mod postgres_report;
pub mod postgres_work;

pub use postgres_report::PostgresReportRepository;
pub use postgres_work::PostgresWorkRepository;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::repository::{ReportRepository, RepositoryError, WorkRepository};
use crate::domain::{NewReport, NewWork, Report, Work};

#[derive(Clone, Default)]
pub struct InMemoryWorkRepository {
    works: Arc<RwLock<BTreeMap<i64, Work>>>,
}

impl InMemoryWorkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkRepository for InMemoryWorkRepository {
    async fn create(&self, work: NewWork) -> Result<Work, RepositoryError> {
        let mut works = self
            .works
            .write()
            .map_err(|e| RepositoryError::Unknown(e.to_string()))?;
        let id = works.keys().next_back().copied().unwrap_or(0) + 1;
        let work = Work {
            id,
            student: work.student,
            task: work.task,
            file_path: work.file_path,
            uploaded_at: Utc::now().trunc_subsecs(0),
        };
        works.insert(id, work.clone());
        Ok(work)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Work>, RepositoryError> {
        let works = self
            .works
            .read()
            .map_err(|e| RepositoryError::Unknown(e.to_string()))?;
        Ok(works.get(&id).cloned())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryReportRepository {
    reports: Arc<RwLock<BTreeMap<i64, Report>>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn create(&self, report: NewReport) -> Result<Report, RepositoryError> {
        let mut reports = self
            .reports
            .write()
            .map_err(|e| RepositoryError::Unknown(e.to_string()))?;
        let id = reports.keys().next_back().copied().unwrap_or(0) + 1;
        let report = Report {
            id,
            work_id: report.work_id,
            status: report.status,
            similarity: report.similarity,
            details: report.details,
            created_at: Utc::now().trunc_subsecs(0),
        };
        reports.insert(id, report.clone());
        Ok(report)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>, RepositoryError> {
        let reports = self
            .reports
            .read()
            .map_err(|e| RepositoryError::Unknown(e.to_string()))?;
        Ok(reports.get(&id).cloned())
    }

    async fn find_by_work_id(&self, work_id: i64) -> Result<Option<Report>, RepositoryError> {
        let reports = self
            .reports
            .read()
            .map_err(|e| RepositoryError::Unknown(e.to_string()))?;
        Ok(reports
            .values()
            .rev()
            .find(|r| r.work_id == work_id)
            .cloned())
    }
}
