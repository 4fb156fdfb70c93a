//! Pure athlete validation rules.
//!
//! # Responsibility
//! - Check per-field and cross-field athlete rules before any store mutation.
//! - Collect every failure instead of stopping at the first one.
//!
//! # Invariants
//! - `validate_athlete` is pure: no I/O, no store access.
//! - The BMI rule only fires when height and weight individually pass their
//!   range checks, and it attaches to the weight field.

use crate::model::athlete::AthleteInput;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Inclusive lower bound for date of birth.
pub const DOB_MIN: &str = "1995-08-22";
/// Exclusive upper bound for date of birth.
pub const DOB_MAX_EXCLUSIVE: &str = "2013-08-07";

pub const HEIGHT_MIN_CM: i64 = 61;
pub const HEIGHT_MAX_CM: i64 = 245;
pub const WEIGHT_MIN_KG: f64 = 18.0;
pub const WEIGHT_MAX_KG: f64 = 180.0;
/// Inclusive lower bound for body-mass index.
pub const BMI_MIN: f64 = 15.0;
/// Exclusive upper bound for body-mass index.
pub const BMI_MAX_EXCLUSIVE: f64 = 40.0;

const FIRST_NAME_MAX: usize = 50;
const MIDDLE_NAME_MAX: usize = 50;
const LAST_NAME_MAX: usize = 100;
const AFFILIATION_MAX: usize = 255;

static ATHLETE_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{7}$").expect("athlete code pattern must compile"));
static ISO_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("iso date pattern must compile"));

/// Field an individual validation failure is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AthleteField {
    FirstName,
    MiddleName,
    LastName,
    AthleteCode,
    Dob,
    Height,
    Weight,
    Gender,
    Affiliation,
}

impl AthleteField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::MiddleName => "middle_name",
            Self::LastName => "last_name",
            Self::AthleteCode => "athlete_code",
            Self::Dob => "dob",
            Self::Height => "height_cm",
            Self::Weight => "weight_kg",
            Self::Gender => "gender",
            Self::Affiliation => "affiliation",
        }
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleViolation {
    Required,
    TooLong { max: usize },
    CodeFormat,
    DateFormat,
    DobRange,
    HeightRange,
    WeightRange,
    BmiRange,
    GenderFormat,
}

/// One field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: AthleteField,
    pub rule: RuleViolation,
}

impl ValidationError {
    fn new(field: AthleteField, rule: RuleViolation) -> Self {
        Self { field, rule }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let field = self.field.as_str();
        match self.rule {
            RuleViolation::Required => write!(f, "{field} cannot be blank"),
            RuleViolation::TooLong { max } => {
                write!(f, "{field} cannot be more than {max} characters long")
            }
            RuleViolation::CodeFormat => {
                write!(f, "{field} must be exactly 7 numeric digits")
            }
            RuleViolation::DateFormat => write!(f, "{field} must be a valid YYYY-MM-DD date"),
            RuleViolation::DobRange => write!(
                f,
                "{field} must be on or after {DOB_MIN} and before {DOB_MAX_EXCLUSIVE}"
            ),
            RuleViolation::HeightRange => write!(
                f,
                "{field} must be between {HEIGHT_MIN_CM}cm and {HEIGHT_MAX_CM}cm"
            ),
            RuleViolation::WeightRange => write!(
                f,
                "{field} must be between {WEIGHT_MIN_KG}kg and {WEIGHT_MAX_KG}kg"
            ),
            RuleViolation::BmiRange => write!(
                f,
                "{field} yields a BMI outside [{BMI_MIN}, {BMI_MAX_EXCLUSIVE})"
            ),
            RuleViolation::GenderFormat => write!(f, "{field} must be either M or W"),
        }
    }
}

impl Error for ValidationError {}

/// Validates one athlete input, returning every rule failure found.
///
/// An empty vector means the input is acceptable for persistence.
pub fn validate_athlete(input: &AthleteInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_required_text(
        &mut errors,
        AthleteField::FirstName,
        &input.first_name,
        FIRST_NAME_MAX,
    );
    if let Some(middle_name) = &input.middle_name {
        if middle_name.chars().count() > MIDDLE_NAME_MAX {
            errors.push(ValidationError::new(
                AthleteField::MiddleName,
                RuleViolation::TooLong {
                    max: MIDDLE_NAME_MAX,
                },
            ));
        }
    }
    check_required_text(
        &mut errors,
        AthleteField::LastName,
        &input.last_name,
        LAST_NAME_MAX,
    );

    if input.athlete_code.trim().is_empty() {
        errors.push(ValidationError::new(
            AthleteField::AthleteCode,
            RuleViolation::Required,
        ));
    } else if !ATHLETE_CODE_PATTERN.is_match(&input.athlete_code) {
        errors.push(ValidationError::new(
            AthleteField::AthleteCode,
            RuleViolation::CodeFormat,
        ));
    }

    check_dob(&mut errors, &input.dob);

    let height_ok = (HEIGHT_MIN_CM..=HEIGHT_MAX_CM).contains(&input.height_cm);
    if !height_ok {
        errors.push(ValidationError::new(
            AthleteField::Height,
            RuleViolation::HeightRange,
        ));
    }

    let weight_ok = input.weight_kg >= WEIGHT_MIN_KG && input.weight_kg <= WEIGHT_MAX_KG;
    if !weight_ok {
        errors.push(ValidationError::new(
            AthleteField::Weight,
            RuleViolation::WeightRange,
        ));
    }

    if height_ok && weight_ok {
        let bmi = input.bmi();
        if !(BMI_MIN..BMI_MAX_EXCLUSIVE).contains(&bmi) {
            errors.push(ValidationError::new(
                AthleteField::Weight,
                RuleViolation::BmiRange,
            ));
        }
    }

    if input.gender != "M" && input.gender != "W" {
        errors.push(ValidationError::new(
            AthleteField::Gender,
            RuleViolation::GenderFormat,
        ));
    }

    check_required_text(
        &mut errors,
        AthleteField::Affiliation,
        &input.affiliation,
        AFFILIATION_MAX,
    );

    errors
}

fn check_required_text(
    errors: &mut Vec<ValidationError>,
    field: AthleteField,
    value: &str,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, RuleViolation::Required));
    } else if value.chars().count() > max {
        errors.push(ValidationError::new(field, RuleViolation::TooLong { max }));
    }
}

fn check_dob(errors: &mut Vec<ValidationError>, dob: &str) {
    if dob.trim().is_empty() {
        errors.push(ValidationError::new(
            AthleteField::Dob,
            RuleViolation::Required,
        ));
        return;
    }

    if !is_plausible_iso_date(dob) {
        errors.push(ValidationError::new(
            AthleteField::Dob,
            RuleViolation::DateFormat,
        ));
        return;
    }

    // ISO dates compare correctly as text: lower bound inclusive, upper
    // bound exclusive.
    if dob < DOB_MIN || dob >= DOB_MAX_EXCLUSIVE {
        errors.push(ValidationError::new(
            AthleteField::Dob,
            RuleViolation::DobRange,
        ));
    }
}

fn is_plausible_iso_date(value: &str) -> bool {
    if !ISO_DATE_PATTERN.is_match(value) {
        return false;
    }

    let year: i64 = value[0..4].parse().unwrap_or(0);
    let month: u32 = value[5..7].parse().unwrap_or(0);
    let day: u32 = value[8..10].parse().unwrap_or(0);
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
