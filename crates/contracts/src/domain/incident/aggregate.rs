use serde::{Deserialize, Serialize};

use crate::shared::validation::{validate_description, validate_title};

// ============================================================================
// Status
// ============================================================================

/// Lifecycle status of an incident report.
///
/// New incidents always start as `Open`; later transitions are free-form and
/// only restricted by authorization, not by a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl IncidentStatus {
    pub const ALL: [IncidentStatus; 4] = [
        IncidentStatus::Open,
        IncidentStatus::InProgress,
        IncidentStatus::Resolved,
        IncidentStatus::Closed,
    ];

    /// Wire representation, identical to what the API exchanges.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Open => "OPEN",
            IncidentStatus::InProgress => "IN_PROGRESS",
            IncidentStatus::Resolved => "RESOLVED",
            IncidentStatus::Closed => "CLOSED",
        }
    }

    /// Human-readable label for form controls.
    pub fn label(&self) -> &'static str {
        match self {
            IncidentStatus::Open => "Open",
            IncidentStatus::InProgress => "In Progress",
            IncidentStatus::Resolved => "Resolved",
            IncidentStatus::Closed => "Closed",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(IncidentStatus::Open),
            "IN_PROGRESS" => Some(IncidentStatus::InProgress),
            "RESOLVED" => Some(IncidentStatus::Resolved),
            "CLOSED" => Some(IncidentStatus::Closed),
            _ => None,
        }
    }
}

impl Default for IncidentStatus {
    fn default() -> Self {
        IncidentStatus::Open
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// An incident report as the remote resource serves it.
///
/// `id`, authorship and timestamps are server-assigned; the client never
/// fabricates them. Timestamps arrive as ISO-8601 strings and are coerced to
/// UTC instants on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,

    pub title: String,

    pub description: String,

    pub status: IncidentStatus,

    #[serde(rename = "createdBy")]
    pub created_by: String,

    #[serde(rename = "updatedBy")]
    pub updated_by: String,

    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Incident {
    /// Check the record against the same field bounds the server enforces.
    ///
    /// Used at the wire boundary: a record that fails here is treated as a
    /// malformed payload, so downstream code can assume every `Incident` it
    /// sees is well-formed by construction.
    pub fn validate(&self) -> Result<(), String> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        Ok(())
    }
}

// ============================================================================
// Wire DTOs
// ============================================================================

/// Body of a create request. The server assigns everything else.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IncidentDraft {
    pub title: String,
    pub description: String,
}

/// Body of an update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentPatch {
    pub title: String,
    pub description: String,
    pub status: IncidentStatus,
}

/// Confirmation payload returned by every mutating endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_record() -> &'static str {
        r#"{
            "id": "inc-7",
            "title": "Checkout outage",
            "description": "Payments fail with a 502 since the morning deploy",
            "status": "IN_PROGRESS",
            "createdBy": "alice",
            "updatedBy": "admin",
            "createdAt": "2024-03-01T09:30:00Z",
            "updatedAt": "2024-03-01T11:05:00Z"
        }"#
    }

    #[test]
    fn deserializes_the_wire_shape() {
        let incident: Incident = serde_json::from_str(wire_record()).unwrap();
        assert_eq!(incident.id, "inc-7");
        assert_eq!(incident.status, IncidentStatus::InProgress);
        assert_eq!(incident.created_by, "alice");
        assert_eq!(incident.updated_by, "admin");
        assert!(incident.updated_at > incident.created_at);
        assert!(incident.validate().is_ok());
    }

    #[test]
    fn serializes_camel_case_and_screaming_status() {
        let incident: Incident = serde_json::from_str(wire_record()).unwrap();
        let json = serde_json::to_value(&incident).unwrap();
        assert_eq!(json["createdBy"], "alice");
        assert_eq!(json["status"], "IN_PROGRESS");
        assert!(json.get("created_by").is_none());
    }

    #[test]
    fn status_wire_names_round_trip() {
        for status in IncidentStatus::ALL {
            assert_eq!(IncidentStatus::from_wire(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(IncidentStatus::from_wire("REOPENED"), None);
    }

    #[test]
    fn out_of_bounds_record_fails_validation() {
        let mut incident: Incident = serde_json::from_str(wire_record()).unwrap();
        incident.title = "ok".to_string();
        assert!(incident.validate().is_err());
    }
}
