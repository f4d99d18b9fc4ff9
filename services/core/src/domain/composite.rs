// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Composite view returned by the gateway.

use serde::{Deserialize, Serialize};

use super::{ReportRecord, WorkRecord};

pub const REPORT_SERVICE_UNAVAILABLE: &str = "report service unavailable";
pub const STORAGE_SERVICE_UNAVAILABLE: &str = "storage service unavailable";

/// A work and its report merged for the client, built per request.
///
/// Degraded views carry only one side plus a `message` naming the missing
/// service. Absent fields are omitted from the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeWorkView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<WorkRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CompositeWorkView {
    pub fn complete(work: WorkRecord, report: ReportRecord) -> Self {
        Self {
            work: Some(work),
            report: Some(report),
            message: None,
        }
    }

    pub fn work_only(work: WorkRecord) -> Self {
        Self {
            work: Some(work),
            report: None,
            message: Some(REPORT_SERVICE_UNAVAILABLE.to_string()),
        }
    }

    pub fn report_only(report: ReportRecord) -> Self {
        Self {
            work: None,
            report: Some(report),
            message: Some(STORAGE_SERVICE_UNAVAILABLE.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.work.is_none() || self.report.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work() -> WorkRecord {
        WorkRecord {
            id: 42,
            student: "alice".to_string(),
            task: "hw3".to_string(),
            file_path: "/uploads/alice/hw3.zip".to_string(),
            uploaded_at: "2025-05-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn test_complete_view_has_no_message() {
        let report = ReportRecord {
            id: 9,
            work_id: 42,
            status: "pending".to_string(),
            similarity: -1.0,
            details: "pending".to_string(),
            created_at: "2025-05-01 10:00:01".to_string(),
        };
        let json = serde_json::to_value(CompositeWorkView::complete(work(), report)).unwrap();

        assert!(json.get("message").is_none());
        assert_eq!(json["work"]["id"], 42);
        assert_eq!(json["report"]["work_id"], 42);
    }

    #[test]
    fn test_degraded_view_omits_missing_side() {
        let view = CompositeWorkView::work_only(work());
        assert!(view.is_degraded());

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("report").is_none());
        assert_eq!(json["message"], "report service unavailable");
    }
}
