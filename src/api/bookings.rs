//! Bookings route group
//!
//! Owns the `/api/bookings` prefix. Booking creation and lookup endpoints
//! register on the router returned here; the gateway only mounts the group.

use axum::Router;

use crate::server::{AppState, RouteGroup};

/// Mount prefix owned by this group.
pub const PREFIX: &str = "/api/bookings";

/// Build the booking route group.
pub fn routes() -> RouteGroup {
    RouteGroup::new(PREFIX, Router::<AppState>::new())
}
