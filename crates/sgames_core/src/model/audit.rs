//! Audit stamping and optimistic-concurrency tokens.
//!
//! # Responsibility
//! - Track who created/updated a row and when.
//! - Issue opaque version tokens used to detect lost updates.
//!
//! # Invariants
//! - The acting principal is always an explicit parameter; there is no
//!   ambient "current user" state in core.
//! - A fresh token is never derived from a client-supplied value.
//! - Stamping is a pure side effect on the record; it cannot fail.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Sentinel recorded when no resolved identity is available.
const UNKNOWN_PRINCIPAL: &str = "Unknown";

/// Acting identity recorded in audit columns.
///
/// Threaded explicitly through every write call; transport layers resolve it
/// from their request context and fall back to [`Principal::fallback`] when
/// nobody is authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal(String);

impl Principal {
    /// Creates a principal from a resolved identity display name.
    ///
    /// Blank names collapse to the fallback sentinel so audit columns never
    /// hold empty strings.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            Self::fallback()
        } else {
            Self(name)
        }
    }

    /// Creates the sentinel principal used when no identity is present.
    pub fn fallback() -> Self {
        Self(UNKNOWN_PRINCIPAL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque version stamp regenerated on every insert/update.
///
/// Stored as 32 lowercase hex characters. Equality is the only meaningful
/// operation; the value carries no ordering or timestamp semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionToken(String);

impl VersionToken {
    /// Generates a fresh token, unrelated to any prior value.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps a token value read back from persistence.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VersionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who-and-when columns shared by audited entities.
///
/// Entities embed this struct instead of inheriting audit behavior; the
/// stamping helpers below operate on the embedded struct directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStamp {
    pub created_by: String,
    /// Creation time in epoch milliseconds.
    pub created_on: i64,
    pub updated_by: String,
    /// Last update time in epoch milliseconds.
    pub updated_on: i64,
}

impl AuditStamp {
    /// Stamp for a brand-new row: created and updated pairs are identical.
    pub fn on_create(principal: &Principal) -> Self {
        let now = now_epoch_ms();
        Self {
            created_by: principal.as_str().to_string(),
            created_on: now,
            updated_by: principal.as_str().to_string(),
            updated_on: now,
        }
    }

    /// Refreshes only the updated pair, preserving creation provenance.
    pub fn on_update(&mut self, principal: &Principal) {
        self.updated_by = principal.as_str().to_string();
        self.updated_on = now_epoch_ms();
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
