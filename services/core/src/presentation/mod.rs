// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP routers for the gateway, storage and analysis services

pub mod analysis_api;
pub mod error;
pub mod gateway_api;
pub mod middleware;
pub mod storage_api;

pub use error::ApiError;
