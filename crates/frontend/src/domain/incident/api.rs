//! Resource client for the remote incident API.
//!
//! Every operation follows the same discipline: acquire a fresh CSRF token
//! from the session provider (abort before any network I/O when there is
//! none), issue exactly one request, validate the response shape, and never
//! let an error escape this module — callers get `None` and the diagnostic
//! is already logged. Downstream code can therefore treat every `Incident`
//! it receives as well-formed by construction.

use contracts::domain::incident::{ApiMessage, Incident, IncidentDraft, IncidentPatch};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;
use crate::system::auth;

/// Header the incident API expects the per-session CSRF token in.
const CSRF_HEADER: &str = "X-XSRF-Token";

/// Fetch the full incident collection.
///
/// `None` on any failure; the caller keeps whatever view it already had.
pub async fn list_incidents() -> Option<Vec<Incident>> {
    match try_list().await {
        Ok(incidents) => Some(incidents),
        Err(e) => {
            log::error!("incident list failed: {}", e);
            None
        }
    }
}

/// Create an incident from a draft.
///
/// `None` on any failure; the caller must not assume the incident exists.
pub async fn create_incident(draft: &IncidentDraft) -> Option<ApiMessage> {
    match try_create(draft).await {
        Ok(message) => Some(message),
        Err(e) => {
            log::error!("incident create failed: {}", e);
            None
        }
    }
}

/// Update an existing incident.
pub async fn update_incident(id: &str, patch: &IncidentPatch) -> Option<ApiMessage> {
    match try_update(id, patch).await {
        Ok(message) => Some(message),
        Err(e) => {
            log::error!("incident update failed: {}", e);
            None
        }
    }
}

/// Delete an existing incident. Hard removal; there is no tombstone.
pub async fn delete_incident(id: &str) -> Option<ApiMessage> {
    match try_delete(id).await {
        Ok(message) => Some(message),
        Err(e) => {
            log::error!("incident delete failed: {}", e);
            None
        }
    }
}

async fn try_list() -> Result<Vec<Incident>, String> {
    let token = auth::api::csrf_token().await?;

    let response = Request::get(&api_url("/incidents"))
        .header(CSRF_HEADER, &token)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let incidents = response
        .json::<Vec<Incident>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    // Shape validation happens once, here: a single record violating the
    // field bounds rejects the whole payload.
    for incident in &incidents {
        incident
            .validate()
            .map_err(|e| format!("malformed incident {:?}: {}", incident.id, e))?;
    }

    Ok(incidents)
}

async fn try_create(draft: &IncidentDraft) -> Result<ApiMessage, String> {
    let token = auth::api::csrf_token().await?;

    let response = Request::post(&api_url("/incident"))
        .header(CSRF_HEADER, &token)
        .json(draft)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<ApiMessage>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn try_update(id: &str, patch: &IncidentPatch) -> Result<ApiMessage, String> {
    let token = auth::api::csrf_token().await?;

    let response = Request::put(&api_url(&format!("/incident/{}", id)))
        .header(CSRF_HEADER, &token)
        .json(patch)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<ApiMessage>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn try_delete(id: &str) -> Result<ApiMessage, String> {
    let token = auth::api::csrf_token().await?;

    let response = Request::delete(&api_url(&format!("/incident/{}", id)))
        .header(CSRF_HEADER, &token)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json::<ApiMessage>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
