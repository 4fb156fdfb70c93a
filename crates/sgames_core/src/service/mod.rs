//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep transport layers decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Write APIs take the acting [`Principal`](crate::model::audit::Principal)
//!   explicitly; there is no ambient identity.

pub mod athlete_service;
pub mod contingent_service;
pub mod sport_service;
