//! API error types and HTTP response mapping.

pub mod types;

pub use types::ApiError;
