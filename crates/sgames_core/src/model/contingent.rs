//! Contingent domain model.
//!
//! A contingent is the delegation an athlete competes for. It owns zero or
//! more athletes; deleting a contingent with athletes is rejected by the
//! store's restrict-delete foreign key.

use serde::{Deserialize, Serialize};

/// Row identifier for a contingent.
pub type ContingentId = i64;

/// Input shape for creating a contingent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingentInput {
    /// Short unique delegation code, e.g. `ON`.
    pub code: String,
    pub name: String,
}

/// Read model for a persisted contingent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingentRecord {
    pub id: ContingentId,
    pub code: String,
    pub name: String,
    /// Number of athletes currently referencing this contingent.
    pub athlete_count: i64,
}

/// Compact shape joined onto athlete reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingentSummary {
    pub id: ContingentId,
    pub code: String,
    pub name: String,
}
