//! Middleware module
//!
//! Contains the HTTP middleware stages the gateway installs ahead of route
//! dispatch: request body decoding and request logging. The CORS stage is a
//! plain tower layer and is built in [`crate::server::routes`].

pub mod body;
pub mod logging;

// Re-export commonly used items
pub use body::{decode_body, DecodedBody};
pub use logging::{log_request, TraceId, TRACE_ID_HEADER};
