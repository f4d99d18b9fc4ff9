// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! antiplag Rust SDK
//!
//! Submit works to the antiplag gateway and read back their reports.
//!
//! ```no_run
//! # async fn run() -> Result<(), antiplag_sdk::ClientError> {
//! use antiplag_sdk::{AntiplagClient, NewWork};
//!
//! let client = AntiplagClient::new("http://localhost:8052");
//! let submitted = client
//!     .submit_work(&NewWork::new("alice", "hw1", "/uploads/alice/hw1.py"))
//!     .await?;
//! let work_id = submitted.work.map(|w| w.id).unwrap_or_default();
//! let view = client.get_work(work_id).await?;
//! println!("{:?}", view.report);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use antiplag_core::domain::{CompositeWorkView, NewWork, ReportRecord, WorkRecord};
pub use client::AntiplagClient;
pub use error::ClientError;
