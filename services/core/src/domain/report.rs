// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Reports: similarity results owned by the analysis service, one per work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ValidationError, TIMESTAMP_FORMAT};

/// Similarity value of a report that has not been computed yet.
pub const SIMILARITY_UNKNOWN: f64 = -1.0;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_DONE: &str = "done";

/// A persisted report as the analysis service sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: i64,
    pub work_id: i64,
    pub status: String,
    pub similarity: f64,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn to_record(&self) -> ReportRecord {
        ReportRecord {
            id: self.id,
            work_id: self.work_id,
            status: self.status.clone(),
            similarity: self.similarity,
            details: self.details.clone(),
            created_at: self.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Report as it travels between services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: i64,
    pub work_id: i64,
    pub status: String,
    pub similarity: f64,
    pub details: String,
    pub created_at: String,
}

impl ReportRecord {
    /// Similarity is only meaningful once the check is done.
    pub fn known_similarity(&self) -> Option<f64> {
        (self.status == STATUS_DONE).then_some(self.similarity)
    }
}

/// Body of a create-report request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    #[serde(default)]
    pub work_id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub similarity: f64,
    #[serde(default)]
    pub details: String,
}

impl NewReport {
    /// The placeholder report the gateway files right after a work is created.
    pub fn pending_for(work_id: i64) -> Self {
        Self {
            work_id,
            status: STATUS_PENDING.to_string(),
            similarity: SIMILARITY_UNKNOWN,
            details: STATUS_PENDING.to_string(),
        }
    }

    /// Checks required fields and settles the similarity value.
    ///
    /// A `done` report must carry a similarity in `0..=100`. Any other status
    /// replaces an unset (zero) similarity with [`SIMILARITY_UNKNOWN`].
    pub fn normalize(mut self) -> Result<Self, ValidationError> {
        if self.work_id <= 0 || self.status.trim().is_empty() {
            return Err(ValidationError::MissingField(
                "work_id and status are required".to_string(),
            ));
        }

        if self.status == STATUS_DONE {
            if !(0.0..=100.0).contains(&self.similarity) {
                return Err(ValidationError::OutOfRange(
                    "similarity must be between 0 and 100".to_string(),
                ));
            }
        } else if self.similarity == 0.0 {
            self.similarity = SIMILARITY_UNKNOWN;
        }

        Ok(self)
    }
}
