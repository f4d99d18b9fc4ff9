// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Work Repository
//!
//! `WorkRepository` backed by the `works` table:
//!
//! ```sql
//! CREATE TABLE works (
//!     id          BIGSERIAL PRIMARY KEY,
//!     student     TEXT NOT NULL,
//!     task        TEXT NOT NULL,
//!     file_path   TEXT NOT NULL,
//!     uploaded_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::repository::{RepositoryError, WorkRepository};
use crate::domain::{NewWork, Work};

pub struct PostgresWorkRepository {
    pool: PgPool,
}

impl PostgresWorkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn work_from_row(row: &PgRow) -> Result<Work, sqlx::Error> {
    Ok(Work {
        id: row.try_get("id")?,
        student: row.try_get("student")?,
        task: row.try_get("task")?,
        file_path: row.try_get("file_path")?,
        uploaded_at: row.try_get("uploaded_at")?,
    })
}

#[async_trait]
impl WorkRepository for PostgresWorkRepository {
    async fn create(&self, work: NewWork) -> Result<Work, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO works (student, task, file_path)
            VALUES ($1, $2, $3)
            RETURNING id, student, task, file_path, uploaded_at
            "#,
        )
        .bind(&work.student)
        .bind(&work.task)
        .bind(&work.file_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to insert work: {}", e)))?;

        Ok(work_from_row(&row)?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Work>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, student, task, file_path, uploaded_at
            FROM works
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(work_from_row)
            .transpose()
            .map_err(RepositoryError::from)
    }
}
