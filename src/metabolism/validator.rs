//! Input validation
//!
//! Checks a raw field set against the rules for its declared unit system and
//! either produces an [`InputRecord`] or one message per invalid field.
//!
//! Each field is checked numeric -> required -> range, and the first failing
//! check is the field's message. Height fields that belong to the other unit
//! system are ignored.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::units::{
    MAX_BODY_FAT_PERCENT, MAX_HEIGHT_IN, MAX_MEASUREMENT, MIN_BODY_FAT_PERCENT, MIN_HEIGHT_CM,
    MIN_HEIGHT_FT, MIN_HEIGHT_IN,
};
use crate::models::{
    ActivityLevel, Field, Gender, HeightSpec, InputRecord, RawFields, RawValue, UnitSystem,
};

/// Field-level validation failures, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} invalid field(s): {}", .errors.len(), describe(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

fn describe(errors: &BTreeMap<Field, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. The first message for a field wins.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<Field, String> {
        self.errors
    }
}

/// `{valid, errors}` view of one validation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub unit_system: UnitSystem,
    pub errors: BTreeMap<Field, String>,
}

/// Outcome of reading one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
enum Reading {
    Missing,
    NotANumber,
    Number(f64),
}

fn read(value: Option<&RawValue>) -> Reading {
    match value {
        None => Reading::Missing,
        Some(RawValue::Number(n)) if n.is_finite() => Reading::Number(*n),
        Some(RawValue::Number(_)) => Reading::NotANumber,
        Some(RawValue::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Reading::Missing;
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Reading::Number(n),
                _ => Reading::NotANumber,
            }
        }
    }
}

/// Messages for one required numeric field
struct NumberRule {
    field: Field,
    not_a_number: &'static str,
    missing: &'static str,
}

impl NumberRule {
    /// Apply the numeric and required checks, then `range`
    fn check(
        &self,
        value: Option<&RawValue>,
        errors: &mut ValidationErrors,
        range: impl FnOnce(f64) -> Result<(), &'static str>,
    ) -> Option<f64> {
        let n = match read(value) {
            Reading::NotANumber => {
                errors.add(self.field, self.not_a_number);
                return None;
            }
            Reading::Missing => {
                errors.add(self.field, self.missing);
                return None;
            }
            Reading::Number(n) => n,
        };

        match range(n) {
            Ok(()) => Some(n),
            Err(message) => {
                errors.add(self.field, message);
                None
            }
        }
    }
}

/// Accept `0 < n <= MAX_MEASUREMENT`
fn positive(message: &'static str) -> impl FnOnce(f64) -> Result<(), &'static str> {
    move |n| {
        if n > 0.0 && n <= MAX_MEASUREMENT {
            Ok(())
        } else {
            Err(message)
        }
    }
}

fn check_weight(raw: &RawFields, errors: &mut ValidationErrors) -> Option<f64> {
    NumberRule {
        field: Field::Weight,
        not_a_number: "Enter a number",
        missing: "Weight is required",
    }
    .check(raw.weight.as_ref(), errors, positive("Invalid weight"))
}

fn check_age(raw: &RawFields, errors: &mut ValidationErrors) -> Option<f64> {
    NumberRule {
        field: Field::Age,
        not_a_number: "Enter a number",
        missing: "Age is required",
    }
    .check(raw.age.as_ref(), errors, positive("Invalid age"))
}

fn check_height(
    raw: &RawFields,
    unit_system: UnitSystem,
    errors: &mut ValidationErrors,
) -> Option<HeightSpec> {
    match unit_system {
        UnitSystem::Metric => {
            let cm = NumberRule {
                field: Field::HeightCm,
                not_a_number: "Enter height in cm",
                missing: "Height is required",
            }
            .check(raw.height_cm.as_ref(), errors, |n| {
                if n < MIN_HEIGHT_CM {
                    Err("Minimum height 30 cm")
                } else if n > MAX_MEASUREMENT {
                    Err("Invalid height")
                } else {
                    Ok(())
                }
            })?;
            Some(HeightSpec::Metric { cm })
        }
        UnitSystem::Imperial => {
            let feet = NumberRule {
                field: Field::HeightFt,
                not_a_number: "Enter height in ft",
                missing: "Height (ft) is required",
            }
            .check(raw.height_ft.as_ref(), errors, |n| {
                if n < MIN_HEIGHT_FT {
                    Err("Minimum 1 ft")
                } else if n > MAX_MEASUREMENT {
                    Err("Invalid height")
                } else {
                    Ok(())
                }
            });
            let inches = NumberRule {
                field: Field::HeightIn,
                not_a_number: "Enter height in in",
                missing: "Height (in) is required",
            }
            .check(raw.height_in.as_ref(), errors, |n| {
                if n < MIN_HEIGHT_IN {
                    Err("Minimum 0 in")
                } else if n > MAX_HEIGHT_IN {
                    Err("Maximum 11 in")
                } else {
                    Ok(())
                }
            });
            Some(HeightSpec::Imperial {
                feet: feet?,
                inches: inches?,
            })
        }
    }
}

fn check_gender(raw: &RawFields, errors: &mut ValidationErrors) -> Option<Gender> {
    let text = match raw.gender.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add(Field::Gender, "Gender is required");
            return None;
        }
        Some(text) => text,
    };

    let gender = Gender::from_str(text);
    if gender.is_none() {
        errors.add(Field::Gender, "Gender must be male or female");
    }
    gender
}

/// Body fat is optional: missing or empty text means "not provided",
/// which is distinct from 0.
fn check_body_fat(raw: &RawFields, errors: &mut ValidationErrors) -> Result<Option<f64>, ()> {
    match read(raw.body_fat.as_ref()) {
        Reading::Missing => Ok(None),
        Reading::NotANumber => {
            errors.add(Field::BodyFat, "Enter a number");
            Err(())
        }
        Reading::Number(n) if n < MIN_BODY_FAT_PERCENT => {
            errors.add(Field::BodyFat, "Cannot be negative");
            Err(())
        }
        Reading::Number(n) if n > MAX_BODY_FAT_PERCENT => {
            errors.add(Field::BodyFat, "Maximum 100%");
            Err(())
        }
        Reading::Number(n) => Ok(Some(n)),
    }
}

fn check_activity_level(raw: &RawFields, errors: &mut ValidationErrors) -> Option<ActivityLevel> {
    match read(raw.activity_level.as_ref()) {
        Reading::Missing | Reading::NotANumber => {
            errors.add(Field::ActivityLevel, "Select a level");
            None
        }
        Reading::Number(n) => {
            let level = ActivityLevel::from_multiplier(n);
            if level.is_none() {
                errors.add(
                    Field::ActivityLevel,
                    "Activity level must be one of 1.2, 1.375, 1.55, 1.725, 1.9",
                );
            }
            level
        }
    }
}

/// Validate a raw field set for the declared unit system.
///
/// Every field is checked even after an earlier one fails, so the error set
/// names all invalid fields at once.
pub fn validate(raw: &RawFields, unit_system: UnitSystem) -> Result<InputRecord, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let weight = check_weight(raw, &mut errors);
    let height = check_height(raw, unit_system, &mut errors);
    let age = check_age(raw, &mut errors);
    let gender = check_gender(raw, &mut errors);
    let body_fat = check_body_fat(raw, &mut errors);
    let activity_level = check_activity_level(raw, &mut errors);

    match (weight, height, age, gender, body_fat, activity_level) {
        (Some(weight), Some(height), Some(age), Some(gender), Ok(body_fat), Some(activity_level))
            if errors.is_empty() =>
        {
            tracing::debug!(
                unit_system = unit_system.as_str(),
                body_fat_present = body_fat.is_some(),
                "input validated"
            );
            Ok(InputRecord {
                weight,
                height,
                age,
                gender,
                body_fat,
                activity_level,
            })
        }
        _ => {
            tracing::debug!(invalid_fields = errors.len(), "input rejected");
            Err(errors)
        }
    }
}

/// Run one validation pass and report `{valid, errors}`.
///
/// Intended for live validation on every field change; a caller keeps its
/// compute action disabled while `valid` is false.
pub fn check(raw: &RawFields, unit_system: UnitSystem) -> ValidationReport {
    let errors = match validate(raw, unit_system) {
        Ok(_) => BTreeMap::new(),
        Err(errors) => errors.into_map(),
    };

    ValidationReport {
        valid: errors.is_empty(),
        unit_system,
        errors,
    }
}
