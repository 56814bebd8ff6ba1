//! Profile enums
//!
//! Unit system, gender and the five fixed activity levels.

use serde::{Deserialize, Serialize};

/// Measurement system the caller entered weight and height in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilograms and centimeters
    #[default]
    Metric,
    /// Pounds, feet and inches
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Some(UnitSystem::Metric),
            "imperial" | "us" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }

    /// Unit label for weight in this system
    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    /// Unit label for height in this system
    pub fn height_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "ft/in",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Habitual activity level, one of five fixed multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Intense,
    Athlete,
}

impl ActivityLevel {
    /// All levels, lowest multiplier first
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Intense,
        ActivityLevel::Athlete,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Intense => 1.725,
            ActivityLevel::Athlete => 1.9,
        }
    }

    /// Look up the level whose multiplier equals `value` exactly.
    ///
    /// No rounding or clamping: 1.5 is not "close enough" to 1.55.
    pub fn from_multiplier(value: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.multiplier() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Intense => "intense",
            ActivityLevel::Athlete => "athlete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (office work)",
            ActivityLevel::Light => "Light exercise (1-2x/week)",
            ActivityLevel::Moderate => "Moderate exercise (3-5x/week)",
            ActivityLevel::Intense => "Intense exercise (6-7x/week)",
            ActivityLevel::Athlete => "Athlete (2x/day)",
        }
    }
}
