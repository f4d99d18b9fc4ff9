// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Infrastructure adapters: PostgreSQL pool, repositories and HTTP clients
//! for the downstream services.

pub mod db;
pub mod downstream;
pub mod repositories;
