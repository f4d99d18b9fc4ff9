// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Works: student submissions owned by the storage service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ValidationError, TIMESTAMP_FORMAT};

/// A persisted work as the storage service sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Work {
    pub id: i64,
    pub student: String,
    pub task: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Work {
    pub fn to_record(&self) -> WorkRecord {
        WorkRecord {
            id: self.id,
            student: self.student.clone(),
            task: self.task.clone(),
            file_path: self.file_path.clone(),
            uploaded_at: self.uploaded_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Work as it travels between services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRecord {
    pub id: i64,
    pub student: String,
    pub task: String,
    pub file_path: String,
    pub uploaded_at: String,
}

/// Body of a create-work request. Missing fields decode as empty and are
/// rejected by [`NewWork::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewWork {
    #[serde(default)]
    pub student: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub file_path: String,
}

impl NewWork {
    pub fn new(
        student: impl Into<String>,
        task: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            student: student.into(),
            task: task.into(),
            file_path: file_path.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let blank = |s: &str| s.trim().is_empty();
        if blank(&self.student) || blank(&self.task) || blank(&self.file_path) {
            return Err(ValidationError::MissingField(
                "student, task and file_path are required".to_string(),
            ));
        }
        Ok(())
    }
}
