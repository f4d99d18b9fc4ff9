// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Service wiring
//!
//! Loads the cluster config and builds each service's router from its
//! section. The owning services use PostgreSQL when a DSN is configured and
//! fall back to in-memory storage otherwise.

use anyhow::{Context, Result};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use antiplag_core::application::gateway::GatewayService;
use antiplag_core::application::reports::ReportService;
use antiplag_core::application::works::WorkService;
use antiplag_core::domain::config::{AnalysisConfig, ClusterConfig, GatewayConfig, StorageConfig};
use antiplag_core::domain::repository::{ReportRepository, WorkRepository};
use antiplag_core::infrastructure::db::Database;
use antiplag_core::infrastructure::repositories::{
    InMemoryReportRepository, InMemoryWorkRepository, PostgresReportRepository,
    PostgresWorkRepository,
};
use antiplag_core::presentation::{analysis_api, gateway_api, storage_api};

use crate::logging::{init_logging, with_bootstrap_logging};

/// Load the config, then install logging in its format, then validate
pub fn load_config(path: Option<PathBuf>, log_level: Option<&str>) -> Result<ClusterConfig> {
    let config = with_bootstrap_logging(log_level, || ClusterConfig::load_or_default(path))
        .context("Failed to load configuration")?;
    init_logging(config.env, log_level)?;

    config
        .validate()
        .context("Configuration validation failed")?;

    info!(env = %config.env, "Configuration loaded");
    Ok(config)
}

pub fn gateway_router(config: &GatewayConfig) -> Result<Router> {
    let service =
        GatewayService::from_config(config).context("Failed to build downstream HTTP client")?;

    info!(
        storage = %config.storage_base_url,
        analysis = %config.analysis_base_url,
        timeout_ms = config.downstream_timeout.as_millis() as u64,
        "Gateway downstreams configured"
    );

    Ok(gateway_api::router(Arc::new(service)))
}

pub async fn storage_router(config: &StorageConfig) -> Result<Router> {
    let repo: Arc<dyn WorkRepository> = match &config.database_url {
        Some(dsn) => {
            let db = Database::connect(dsn)
                .await
                .context("Failed to connect storage database")?;
            Arc::new(PostgresWorkRepository::new(db.get_pool().clone()))
        }
        None => {
            warn!("storage.database_url not set; works are kept in memory");
            Arc::new(InMemoryWorkRepository::new())
        }
    };

    Ok(storage_api::router(Arc::new(WorkService::new(repo))))
}

pub async fn analysis_router(config: &AnalysisConfig) -> Result<Router> {
    let repo: Arc<dyn ReportRepository> = match &config.database_url {
        Some(dsn) => {
            let db = Database::connect(dsn)
                .await
                .context("Failed to connect analysis database")?;
            Arc::new(PostgresReportRepository::new(db.get_pool().clone()))
        }
        None => {
            warn!("analysis.database_url not set; reports are kept in memory");
            Arc::new(InMemoryReportRepository::new())
        }
    };

    Ok(analysis_api::router(Arc::new(ReportService::new(repo))))
}
