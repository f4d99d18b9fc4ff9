// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Report Repository
//!
//! `ReportRepository` backed by the `reports` table:
//!
//! ```sql
//! CREATE TABLE reports (
//!     id          BIGSERIAL PRIMARY KEY,
//!     work_id     BIGINT NOT NULL,
//!     status      TEXT NOT NULL,
//!     similarity  DOUBLE PRECISION NOT NULL DEFAULT -1,
//!     details     TEXT NOT NULL DEFAULT '',
//!     created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```
//!
//! `work_id` deliberately has no foreign key: works live in another database.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::repository::{ReportRepository, RepositoryError};
use crate::domain::{NewReport, Report};

pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn report_from_row(row: &PgRow) -> Result<Report, sqlx::Error> {
    Ok(Report {
        id: row.try_get("id")?,
        work_id: row.try_get("work_id")?,
        status: row.try_get("status")?,
        similarity: row.try_get("similarity")?,
        details: row.try_get("details")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn create(&self, report: NewReport) -> Result<Report, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO reports (work_id, status, similarity, details)
            VALUES ($1, $2, $3, $4)
            RETURNING id, work_id, status, similarity, details, created_at
            "#,
        )
        .bind(report.work_id)
        .bind(&report.status)
        .bind(report.similarity)
        .bind(&report.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to insert report: {}", e)))?;

        Ok(report_from_row(&row)?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, work_id, status, similarity, details, created_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(report_from_row)
            .transpose()
            .map_err(RepositoryError::from)
    }

    async fn find_by_work_id(&self, work_id: i64) -> Result<Option<Report>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, work_id, status, similarity, details, created_at
            FROM reports
            WHERE work_id = $1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(work_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(report_from_row)
            .transpose()
            .map_err(RepositoryError::from)
    }
}
