//! Athlete domain model.
//!
//! # Responsibility
//! - Define the write shape ([`AthleteInput`]) and the joined read shape
//!   ([`AthleteRecord`]) for athletes.
//! - Provide derived display helpers (full/formal name, display code, BMI).
//!
//! # Invariants
//! - `athlete_code` is exactly 7 numeric digits and unique across all rows.
//! - `dob` is ISO `YYYY-MM-DD` text; lexical order equals date order.
//! - Records always reference existing contingent and sport rows.

use crate::model::audit::{AuditStamp, VersionToken};
use crate::model::contingent::{ContingentId, ContingentSummary};
use crate::model::sport::{SportId, SportSummary};
use serde::{Deserialize, Serialize};

/// Row identifier for an athlete.
pub type AthleteId = i64;

/// Full set of mutable athlete fields.
///
/// Updates are full-record replaces: every field here overwrites the stored
/// row. The row id and audit provenance are never part of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteInput {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    /// Exactly 7 numeric digits, unique across all athletes.
    pub athlete_code: String,
    /// Date of birth as ISO `YYYY-MM-DD`.
    pub dob: String,
    pub height_cm: i64,
    pub weight_kg: f64,
    /// Competition gender, exactly `M` or `W`.
    pub gender: String,
    /// Club or team affiliation.
    pub affiliation: String,
    pub contingent_id: ContingentId,
    pub sport_id: SportId,
}

impl AthleteInput {
    /// Body-mass index derived from weight (kg) and height (cm).
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm as f64 / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

/// Read model for a persisted athlete, joined with parent summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteRecord {
    pub id: AthleteId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub athlete_code: String,
    pub dob: String,
    pub height_cm: i64,
    pub weight_kg: f64,
    pub gender: String,
    pub affiliation: String,
    pub contingent: ContingentSummary,
    pub sport: SportSummary,
    pub audit: AuditStamp,
    pub row_version: VersionToken,
}

impl AthleteRecord {
    /// `First M. Last`, with the middle name collapsed to an initial.
    pub fn full_name(&self) -> String {
        match middle_initial(self.middle_name.as_deref()) {
            Some(initial) => format!("{} {initial}. {}", self.first_name, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// `Last, First M.` listing form.
    pub fn formal_name(&self) -> String {
        match middle_initial(self.middle_name.as_deref()) {
            Some(initial) => format!("{}, {} {initial}.", self.last_name, self.first_name),
            None => format!("{}, {}", self.last_name, self.first_name),
        }
    }

    /// Zero-padded public identifier, e.g. `A:0004123`.
    pub fn display_code(&self) -> String {
        format!("A:{:0>7}", self.athlete_code)
    }

    /// One-line summary used by list renderings.
    pub fn summary(&self) -> String {
        format!("{} - {}", self.formal_name(), self.display_code())
    }

    /// Whole years of age as of `today` (ISO `YYYY-MM-DD`).
    ///
    /// Takes the reference date explicitly so callers decide what "today"
    /// means and results stay reproducible.
    pub fn age_on(&self, today: &str) -> i64 {
        let (today_year, today_month_day) = split_iso_date(today);
        let (dob_year, dob_month_day) = split_iso_date(&self.dob);

        let mut age = today_year - dob_year;
        // Birthday not reached yet this year.
        if today_month_day < dob_month_day {
            age -= 1;
        }
        age
    }
}

fn split_iso_date(value: &str) -> (i64, &str) {
    let year = value
        .get(0..4)
        .and_then(|year| year.parse().ok())
        .unwrap_or(0);
    (year, value.get(5..).unwrap_or(""))
}

fn middle_initial(middle_name: Option<&str>) -> Option<char> {
    middle_name
        .and_then(|name| name.trim().chars().next())
        .map(|initial| initial.to_ascii_uppercase())
}
