//! Application routing
//!
//! Assembles the gateway router: the root liveness route, the mounted
//! route groups, and the middleware chain (CORS, request logging, body
//! decoding) in its fixed order.

use axum::{http::header, http::Method, middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::api::root;
use crate::middleware::{body::decode_body, logging::log_request};
use crate::server::state::AppState;

/// A route group: a named path prefix plus the opaque router that owns it.
///
/// The gateway imposes nothing on the interior of the router; it only
/// guarantees the prefix is mounted behind the middleware chain. Prefixes
/// must start with `/` and must be disjoint across groups.
#[derive(Clone)]
pub struct RouteGroup {
    prefix: &'static str,
    router: Router<AppState>,
}

impl RouteGroup {
    pub fn new(prefix: &'static str, router: Router<AppState>) -> Self {
        Self { prefix, router }
    }

    /// The path prefix this group owns.
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }
}

/// Create the main application router
///
/// Mounting happens after the root route and before the middleware layers
/// are applied, so every group sits behind the full chain.
pub fn create_router(state: AppState, groups: Vec<RouteGroup>) -> Router {
    let mut router = Router::new().route("/", get(root::liveness));

    for group in groups {
        tracing::debug!(prefix = group.prefix, "Mounting route group");
        router = router.nest(group.prefix, group.router);
    }

    // Layer order: last added = outermost = runs first.
    // Per-request order is therefore CORS -> request logging -> body
    // decoding -> dispatch. CORS stays outermost so preflight and
    // unmatched-route responses still carry its headers; body decoding
    // stays innermost-but-before-dispatch so handlers see parsed payloads.
    router
        .layer(middleware::from_fn_with_state(state.clone(), decode_body))
        .layer(middleware::from_fn(log_request))
        .layer(create_cors_layer())
        .with_state(state)
}

/// Create the CORS layer
///
/// Any origin, the five verbs the API uses, content-type and authorization
/// headers, credentials off. Applied outermost so every response (including
/// errors and 404s) carries these headers.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(false)
}
