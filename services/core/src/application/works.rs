// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Work use cases behind the storage service

use std::sync::Arc;
use tracing::debug;

use super::ServiceError;
use crate::domain::repository::WorkRepository;
use crate::domain::{NewWork, Work};

pub struct WorkService {
    repo: Arc<dyn WorkRepository>,
}

impl WorkService {
    pub fn new(repo: Arc<dyn WorkRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_work(&self, request: NewWork) -> Result<Work, ServiceError> {
        request.validate()?;
        let work = self.repo.create(request).await?;
        debug!(work_id = work.id, student = %work.student, "Work stored");
        Ok(work)
    }

    pub async fn get_work(&self, id: i64) -> Result<Work, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("work {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryWorkRepository;

    #[tokio::test]
    async fn test_create_and_get_work() {
        let service = WorkService::new(Arc::new(InMemoryWorkRepository::new()));

        let created = service
            .create_work(NewWork::new("dave", "hw5", "/uploads/dave/hw5.java"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = service.get_work(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_invalid_work_is_not_stored() {
        let repo = Arc::new(InMemoryWorkRepository::new());
        let service = WorkService::new(repo.clone());

        let err = service
            .create_work(NewWork::new("dave", "hw5", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(repo.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_work_is_not_found() {
        let service = WorkService::new(Arc::new(InMemoryWorkRepository::new()));
        assert!(matches!(
            service.get_work(404).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
