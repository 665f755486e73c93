pub mod access;
pub mod aggregate;

pub use access::{capabilities, Capabilities};
pub use aggregate::{ApiMessage, Incident, IncidentDraft, IncidentPatch, IncidentStatus};
