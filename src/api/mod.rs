//! API endpoint modules
//!
//! Contains the root liveness handler and the three route groups the
//! gateway mounts (auth, buses, bookings).

pub mod auth;
pub mod bookings;
pub mod buses;
pub mod root;

use crate::server::RouteGroup;

/// The production route groups, in mount order.
///
/// Order among the groups is not significant (their prefixes are
/// disjoint); they are listed auth, buses, bookings by convention.
pub fn route_groups() -> Vec<RouteGroup> {
    vec![auth::routes(), buses::routes(), bookings::routes()]
}
