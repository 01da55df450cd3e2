//! Application server
//!
//! This module provides the main application server implementation
//! including initialization and graceful shutdown handling.

use crate::{
    config::Settings,
    server::{routes, routes::RouteGroup, state::AppState},
};
use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;

/// Main application struct
pub struct App {
    settings: Settings,
    state: AppState,
    groups: Vec<RouteGroup>,
}

impl App {
    /// Create a new application instance
    ///
    /// `groups` are the route groups the gateway will mount, in order.
    pub fn new(settings: Settings, groups: Vec<RouteGroup>) -> Self {
        tracing::debug!("Initializing application state");
        let state = AppState::new(settings.clone());

        Self {
            settings,
            state,
            groups,
        }
    }

    /// Run the server (without graceful shutdown)
    ///
    /// Bind failure (port in use, privilege denied) propagates out and is
    /// fatal to the process; there is no retry at this layer.
    pub async fn run(self) -> Result<()> {
        let addr = self.settings.server_addr().parse::<SocketAddr>()?;
        let router = routes::create_router(self.state, self.groups);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Bus Booking API is running on http://{}", addr);

        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Run the server with graceful shutdown support
    ///
    /// The server will shut down gracefully when receiving SIGINT (Ctrl+C)
    /// or SIGTERM signals.
    pub async fn run_with_graceful_shutdown(self) -> Result<()> {
        let addr = self.settings.server_addr().parse::<SocketAddr>()?;
        let router = routes::create_router(self.state, self.groups);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Bus Booking API is running on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    /// Get a reference to the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Create a future that completes when a shutdown signal is received
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
