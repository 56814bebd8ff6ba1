//! Input models
//!
//! Raw caller-supplied fields, the validated input record, and the
//! normalized (kg/cm) input the estimator consumes.

use serde::{Deserialize, Serialize};

use super::profile::{ActivityLevel, Gender, UnitSystem};
use crate::metabolism::converter::{feet_inches_to_cm, pounds_to_kg};

/// A single raw field value as received from a form or tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Possibly partial, possibly malformed field set.
///
/// Height fields for both unit systems may be present at once; the
/// validator only looks at the ones the declared unit system needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFields {
    pub weight: Option<RawValue>,
    pub height_cm: Option<RawValue>,
    pub height_ft: Option<RawValue>,
    pub height_in: Option<RawValue>,
    pub age: Option<RawValue>,
    pub gender: Option<String>,
    pub body_fat: Option<RawValue>,
    pub activity_level: Option<RawValue>,
}

impl RawFields {
    /// Initial values for a blank calculator form
    pub fn form_defaults() -> Self {
        Self {
            weight: None,
            height_cm: None,
            height_ft: Some(RawValue::Number(5.0)),
            height_in: Some(RawValue::Number(9.0)),
            age: None,
            gender: Some(Gender::Male.as_str().to_string()),
            body_fat: None,
            activity_level: Some(RawValue::Number(ActivityLevel::Sedentary.multiplier())),
        }
    }

    /// Set a field from text. The unit system is declared separately,
    /// so `Field::UnitSystem` is not settable here and returns false.
    pub fn set(&mut self, field: Field, value: &str) -> bool {
        let raw = Some(RawValue::from(value));
        match field {
            Field::Weight => self.weight = raw,
            Field::HeightCm => self.height_cm = raw,
            Field::HeightFt => self.height_ft = raw,
            Field::HeightIn => self.height_in = raw,
            Field::Age => self.age = raw,
            Field::Gender => self.gender = Some(value.to_string()),
            Field::BodyFat => self.body_fat = raw,
            Field::ActivityLevel => self.activity_level = raw,
            Field::UnitSystem => return false,
        }
        true
    }
}

/// Field names used to key validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    UnitSystem,
    Weight,
    HeightCm,
    HeightFt,
    HeightIn,
    Age,
    Gender,
    BodyFat,
    ActivityLevel,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::UnitSystem => "unit_system",
            Field::Weight => "weight",
            Field::HeightCm => "height_cm",
            Field::HeightFt => "height_ft",
            Field::HeightIn => "height_in",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::BodyFat => "body_fat",
            Field::ActivityLevel => "activity_level",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "unit_system" | "units" => Some(Field::UnitSystem),
            "weight" => Some(Field::Weight),
            "height_cm" => Some(Field::HeightCm),
            "height_ft" => Some(Field::HeightFt),
            "height_in" => Some(Field::HeightIn),
            "age" => Some(Field::Age),
            "gender" => Some(Field::Gender),
            "body_fat" => Some(Field::BodyFat),
            "activity_level" | "activity" => Some(Field::ActivityLevel),
            _ => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Height in the shape its unit system uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit_system", rename_all = "lowercase")]
pub enum HeightSpec {
    Metric { cm: f64 },
    Imperial { feet: f64, inches: f64 },
}

impl HeightSpec {
    pub fn unit_system(&self) -> UnitSystem {
        match self {
            HeightSpec::Metric { .. } => UnitSystem::Metric,
            HeightSpec::Imperial { .. } => UnitSystem::Imperial,
        }
    }

    pub fn to_cm(&self) -> f64 {
        match *self {
            HeightSpec::Metric { cm } => cm,
            HeightSpec::Imperial { feet, inches } => feet_inches_to_cm(feet, inches),
        }
    }
}

/// A fully validated input record.
///
/// Only the validator builds these; weight is in the unit of the
/// height's unit system (kg for metric, lb for imperial).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputRecord {
    pub(crate) weight: f64,
    pub(crate) height: HeightSpec,
    pub(crate) age: f64,
    pub(crate) gender: Gender,
    pub(crate) body_fat: Option<f64>,
    pub(crate) activity_level: ActivityLevel,
}

impl InputRecord {
    pub fn unit_system(&self) -> UnitSystem {
        self.height.unit_system()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> HeightSpec {
        self.height
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn body_fat(&self) -> Option<f64> {
        self.body_fat
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    /// Convert weight and height to kilograms and centimeters
    pub fn normalize(&self) -> NormalizedInput {
        let weight_kg = match self.unit_system() {
            UnitSystem::Metric => self.weight,
            UnitSystem::Imperial => pounds_to_kg(self.weight),
        };

        NormalizedInput {
            weight_kg,
            height_cm: self.height.to_cm(),
            age: self.age,
            gender: self.gender,
            body_fat: self.body_fat,
            activity_level: self.activity_level,
        }
    }
}

/// Validated input in kilograms and centimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedInput {
    weight_kg: f64,
    height_cm: f64,
    age: f64,
    gender: Gender,
    body_fat: Option<f64>,
    activity_level: ActivityLevel,
}

impl NormalizedInput {
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn body_fat(&self) -> Option<f64> {
        self.body_fat
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }
}
