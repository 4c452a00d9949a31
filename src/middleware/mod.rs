//! Middleware for the user API
//!
//! Request tracing and security response headers.

mod security;
mod tracing;

pub use security::security_headers;
pub use tracing::request_tracing;
