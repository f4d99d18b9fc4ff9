// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! antiplag CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Logging setup, service wiring and server lifecycle for the
//!   `antiplag` binary

pub mod bootstrap;
pub mod commands;
pub mod logging;
pub mod server;
