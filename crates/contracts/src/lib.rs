//! Shared contracts between the incident-reporter frontend and the remote API.
//!
//! Everything that crosses the wire (or is validated on both sides of it)
//! lives here: the incident aggregate, mutation DTOs, validation rules and
//! the session/auth types.

pub mod domain;
pub mod shared;
pub mod system;
