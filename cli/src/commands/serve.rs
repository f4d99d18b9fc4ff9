// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Service commands: `gateway`, `storage`, `analysis` and `start`

use anyhow::Result;
use tracing::info;

use antiplag_core::domain::config::ClusterConfig;

use crate::bootstrap;
use crate::server::{self, ShutdownHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Gateway,
    Storage,
    Analysis,
}

impl ServiceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Gateway => "gateway",
            ServiceKind::Storage => "storage",
            ServiceKind::Analysis => "analysis",
        }
    }

    pub fn address<'a>(&self, config: &'a ClusterConfig) -> &'a str {
        match self {
            ServiceKind::Gateway => &config.gateway.address,
            ServiceKind::Storage => &config.storage.address,
            ServiceKind::Analysis => &config.analysis.address,
        }
    }
}

/// Run one service until the process is signalled
pub async fn run_service(kind: ServiceKind, config: &ClusterConfig) -> Result<()> {
    run_with_shutdown(kind, config, ShutdownHandle::from_signals()).await
}

/// Run the whole cluster in one process; one signal stops all three
pub async fn run_all(config: &ClusterConfig) -> Result<()> {
    let shutdown = ShutdownHandle::from_signals();

    info!(
        env = %config.env,
        gateway = %config.gateway.address,
        storage = %config.storage.address,
        analysis = %config.analysis.address,
        "Starting all services"
    );

    tokio::try_join!(
        run_with_shutdown(ServiceKind::Storage, config, shutdown.clone()),
        run_with_shutdown(ServiceKind::Analysis, config, shutdown.clone()),
        run_with_shutdown(ServiceKind::Gateway, config, shutdown),
    )?;

    Ok(())
}

async fn run_with_shutdown(
    kind: ServiceKind,
    config: &ClusterConfig,
    shutdown: ShutdownHandle,
) -> Result<()> {
    let router = match kind {
        ServiceKind::Gateway => bootstrap::gateway_router(&config.gateway)?,
        ServiceKind::Storage => bootstrap::storage_router(&config.storage).await?,
        ServiceKind::Analysis => bootstrap::analysis_router(&config.analysis).await?,
    };

    info!(service = kind.name(), env = %config.env, "Starting service");
    server::serve(kind.name(), kind.address(config), router, shutdown.wait()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_each_service_reads_its_own_address() {
        let config = ClusterConfig::default();

        assert_eq!(ServiceKind::Gateway.address(&config), "localhost:8052");
        assert_eq!(ServiceKind::Storage.address(&config), "0.0.0.0:8080");
        assert_eq!(ServiceKind::Analysis.address(&config), "0.0.0.0:8081");
    }

    #[tokio::test]
    async fn test_cluster_stops_on_one_signal() {
        let mut config = ClusterConfig::default();
        config.gateway.address = "127.0.0.1:0".to_string();
        config.storage.address = "127.0.0.1:0".to_string();
        config.analysis.address = "127.0.0.1:0".to_string();

        let (tx, shutdown) = ShutdownHandle::new();
        let cluster = async {
            tokio::try_join!(
                run_with_shutdown(ServiceKind::Storage, &config, shutdown.clone()),
                run_with_shutdown(ServiceKind::Analysis, &config, shutdown.clone()),
                run_with_shutdown(ServiceKind::Gateway, &config, shutdown),
            )
        };
        let trigger = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            tx.send(true).unwrap();
        };

        let (result, ()) = tokio::time::timeout(Duration::from_secs(3), async {
            tokio::join!(cluster, trigger)
        })
        .await
        .expect("cluster did not stop");

        assert!(result.is_ok());
    }
}
