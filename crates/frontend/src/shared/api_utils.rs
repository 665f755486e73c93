//! Helpers for talking to the remote incident API.

/// Base URL of the incident resource.
///
/// Built from the current window location, using port 8000 for the incident
/// API server. Auth endpoints are NOT behind this base; the session provider
/// lives on the app's own origin.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8000", protocol, hostname)
}

/// Build a full incident-API URL from a path like `/incidents`.
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
