//! Sport domain model.
//!
//! Sports carry audit columns and a version token: they participate in the
//! same optimistic-concurrency write protocol as athletes.

use crate::model::audit::{AuditStamp, VersionToken};
use serde::{Deserialize, Serialize};

/// Row identifier for a sport.
pub type SportId = i64;

/// Input shape for creating a sport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportInput {
    /// Short unique discipline code, e.g. `ATH`.
    pub code: String,
    pub name: String,
}

/// Read model for a persisted sport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportRecord {
    pub id: SportId,
    pub code: String,
    pub name: String,
    /// Number of athletes currently referencing this sport.
    pub athlete_count: i64,
    pub audit: AuditStamp,
    pub row_version: VersionToken,
}

/// Compact shape joined onto athlete reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportSummary {
    pub id: SportId,
    pub code: String,
    pub name: String,
}
