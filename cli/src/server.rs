// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP server lifecycle
//!
//! Binds a listener, serves a router and drains in-flight requests when the
//! shutdown future resolves. Draining is capped at [`SHUTDOWN_GRACE`]; after
//! that the remaining connections are dropped.

use anyhow::{Context, Result};
use axum::Router;
use std::future::{Future, IntoFuture};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::{oneshot, watch};
use tracing::{error, info, warn};

pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Serve `router` on `address` until `shutdown` resolves
pub async fn serve<F>(name: &'static str, address: &str, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {} to {}", name, address))?;

    serve_listener(name, listener, router, shutdown).await
}

/// Serve on an already bound listener
pub async fn serve_listener<F>(
    name: &'static str,
    listener: TcpListener,
    router: Router,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener
        .local_addr()
        .context("Listener has no local address")?;
    info!(service = name, address = %local, "Listening");

    let (draining_tx, draining_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let _ = draining_tx.send(());
        })
        .into_future();

    let deadline = async move {
        if draining_rx.await.is_err() {
            // Server ended on its own; never race it
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(SHUTDOWN_GRACE).await;
    };

    tokio::select! {
        result = server => {
            result.with_context(|| format!("{} server failed", name))?;
            info!(service = name, "Stopped");
        }
        _ = deadline => {
            warn!(
                service = name,
                grace_secs = SHUTDOWN_GRACE.as_secs(),
                "Shutdown grace period elapsed, dropping open connections"
            );
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

/// One process signal fanned out to several servers
#[derive(Clone)]
pub struct ShutdownHandle {
    rx: watch::Receiver<bool>,
}

impl ShutdownHandle {
    /// Handle plus the sender that triggers it
    pub fn new() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self { rx })
    }

    /// Handle triggered by [`shutdown_signal`]
    pub fn from_signals() -> Self {
        let (tx, handle) = Self::new();
        tokio::spawn(async move {
            shutdown_signal().await;
            let _ = tx.send(true);
        });
        handle
    }

    pub async fn wait(mut self) {
        // A dropped sender also counts as shutdown
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}
