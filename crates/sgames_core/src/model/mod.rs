//! Domain model for the games roster.
//!
//! # Responsibility
//! - Define canonical records for contingents, sports and athletes.
//! - Define the shared audit stamp and optimistic-concurrency token.
//! - Host the pure athlete validation rules.
//!
//! # Invariants
//! - `athlete_code`, contingent `code` and sport `code` are unique across
//!   all rows (enforced by the store, mirrored here in documentation).
//! - Version tokens are opaque and regenerated on every write; callers only
//!   ever compare them for equality.

pub mod athlete;
pub mod audit;
pub mod contingent;
pub mod sport;
pub mod validation;
