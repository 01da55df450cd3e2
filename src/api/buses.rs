//! Bus listings route group
//!
//! Owns the `/api/buses` prefix. Search and listing endpoints register on
//! the router returned here; the gateway only mounts the group.

use axum::Router;

use crate::server::{AppState, RouteGroup};

/// Mount prefix owned by this group.
pub const PREFIX: &str = "/api/buses";

/// Build the bus route group.
pub fn routes() -> RouteGroup {
    RouteGroup::new(PREFIX, Router::<AppState>::new())
}
