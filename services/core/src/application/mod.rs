// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Application services
//!
//! - **gateway**: composite operations over the work and report services
//! - **works** / **reports**: the storage and analysis services' use cases

pub mod gateway;
pub mod reports;
pub mod works;

use crate::domain::repository::RepositoryError;
use crate::domain::ValidationError;

/// Errors of the storage and analysis use cases
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
