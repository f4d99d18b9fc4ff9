// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Report use cases behind the analysis service

use std::sync::Arc;
use tracing::debug;

use super::ServiceError;
use crate::domain::repository::ReportRepository;
use crate::domain::{NewReport, Report};

pub struct ReportService {
    repo: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_report(&self, request: NewReport) -> Result<Report, ServiceError> {
        let request = request.normalize()?;
        let report = self.repo.create(request).await?;
        debug!(
            report_id = report.id,
            work_id = report.work_id,
            status = %report.status,
            "Report stored"
        );
        Ok(report)
    }

    pub async fn get_report(&self, id: i64) -> Result<Report, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("report {}", id)))
    }

    pub async fn get_report_by_work_id(&self, work_id: i64) -> Result<Report, ServiceError> {
        self.repo
            .find_by_work_id(work_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("report for work {}", work_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{STATUS_DONE, STATUS_PENDING};
    use crate::domain::SIMILARITY_UNKNOWN;
    use crate::infrastructure::repositories::InMemoryReportRepository;

    fn service() -> ReportService {
        ReportService::new(Arc::new(InMemoryReportRepository::new()))
    }

    #[tokio::test]
    async fn test_pending_report_keeps_unknown_similarity() {
        let service = service();
        let report = service
            .create_report(NewReport::pending_for(3))
            .await
            .unwrap();

        assert_eq!(report.status, STATUS_PENDING);
        assert_eq!(report.similarity, SIMILARITY_UNKNOWN);
        assert_eq!(service.get_report(report.id).await.unwrap(), report);
    }

    #[tokio::test]
    async fn test_latest_report_wins_for_a_work() {
        let service = service();
        service.create_report(NewReport::pending_for(3)).await.unwrap();
        let done = service
            .create_report(NewReport {
                work_id: 3,
                status: STATUS_DONE.to_string(),
                similarity: 64.0,
                details: "matches hw3 of student 12".to_string(),
            })
            .await
            .unwrap();

        let latest = service.get_report_by_work_id(3).await.unwrap();
        assert_eq!(latest.id, done.id);
        assert_eq!(latest.similarity, 64.0);
    }

    #[tokio::test]
    async fn test_out_of_range_similarity_is_rejected() {
        let err = service()
            .create_report(NewReport {
                work_id: 3,
                status: STATUS_DONE.to_string(),
                similarity: 140.0,
                details: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_work_has_no_report() {
        assert!(matches!(
            service().get_report_by_work_id(77).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
