//! HTTP route handlers for the classifier server.

pub mod pages;
pub mod predict;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
