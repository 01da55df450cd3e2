//! Bus Booking API gateway library
//!
//! Wires the HTTP entry point: CORS, body decoding, route-group mounting,
//! and the listening server. Route-group interiors live in their own
//! modules under [`api`].

// Public modules
pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod server;

// Re-export commonly used types
pub use config::Settings;
pub use error::ApiError;
pub use server::{App, RouteGroup};
