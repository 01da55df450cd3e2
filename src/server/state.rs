//! Application state container
//!
//! This module defines the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::Settings;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
///
/// Read-only after startup: the gateway holds no mutable shared state, so
/// handlers and middleware only ever clone cheap `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            start_time: Instant::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
