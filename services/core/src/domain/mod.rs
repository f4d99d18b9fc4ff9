// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod composite;
pub mod config;
pub mod downstream;
pub mod report;
pub mod repository;
pub mod work;

pub use composite::CompositeWorkView;
pub use report::{NewReport, Report, ReportRecord, SIMILARITY_UNKNOWN};
pub use work::{NewWork, Work, WorkRecord};

/// Wire format for timestamps rendered by the owning services.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Input validation failure shared by works and reports.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}")]
    MissingField(String),

    #[error("{0}")]
    OutOfRange(String),
}
