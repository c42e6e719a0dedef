//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Normalize the configured base URL.
///
/// An empty value keeps requests on the page's own origin, so
/// [`join_url`] produces relative paths like `/api/product/get-products`.
pub fn resolve_api_base(configured: &str) -> String {
    configured.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an API path, tolerating slashes on either side
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
