//! Authentication route group
//!
//! Owns the `/api/auth` prefix. The handler collection behind it (login,
//! registration, token refresh) registers its endpoints on the router
//! returned here; the gateway only mounts the group behind the middleware
//! chain and guarantees pre-decoded bodies and CORS headers.

use axum::Router;

use crate::server::{AppState, RouteGroup};

/// Mount prefix owned by this group.
pub const PREFIX: &str = "/api/auth";

/// Build the auth route group.
///
/// Paths under the prefix with no registered handler fall through to the
/// framework's default not-found response.
pub fn routes() -> RouteGroup {
    RouteGroup::new(PREFIX, Router::<AppState>::new())
}
