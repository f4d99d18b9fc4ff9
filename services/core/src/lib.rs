// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Antiplag core
//!
//! Works, reports and the gateway that composes them.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Domain types, application services, HTTP adapters and routers
//!   shared by the `storage`, `analysis` and `gateway` processes

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
