//! Client for the session provider.
//!
//! Auth lives on the app's own origin; the incident API is a separate
//! collaborator (see `domain::incident::api`). Both the identity and the
//! CSRF token are opaque values to the rest of the app.

use contracts::system::auth::{CsrfResponse, LoginRequest, SessionResponse, SessionUser};
use gloo_net::http::Request;

/// Fetch a fresh CSRF token for the current session.
///
/// Called immediately before every incident-API request; callers must treat
/// an error as "do not issue the call".
pub async fn csrf_token() -> Result<String, String> {
    let response = Request::get("/api/auth/csrf")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("CSRF fetch failed: {}", response.status()));
    }

    let body = response
        .json::<CsrfResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    if body.csrf_token.is_empty() {
        return Err("No CSRF token in session".to_string());
    }
    Ok(body.csrf_token)
}

/// Current authenticated identity, if any.
pub async fn session() -> Result<Option<SessionUser>, String> {
    let response = Request::get("/api/auth/session")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Session fetch failed: {}", response.status()));
    }

    response
        .json::<SessionResponse>()
        .await
        .map(|body| body.user)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn login(email: String, password: String) -> Result<SessionUser, String> {
    let request = LoginRequest { email, password };

    let response = Request::post("/api/auth/login")
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Login failed: {}", response.status()));
    }

    response
        .json::<SessionResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?
        .user
        .ok_or_else(|| "Login response carried no user".to_string())
}

pub async fn logout() -> Result<(), String> {
    let response = Request::post("/api/auth/logout")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Logout failed: {}", response.status()));
    }
    Ok(())
}
