//! Estimate model
//!
//! BMR/TDEE result with the per-activity-level table.

use serde::Serialize;

use super::profile::ActivityLevel;

/// Which BMR equation produced the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Lean-mass based, used when body fat is known
    KatchMcArdle,
    /// Weight/height/age/gender based
    MifflinStJeor,
}

impl BmrFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmrFormula::KatchMcArdle => "katch_mcardle",
            BmrFormula::MifflinStJeor => "mifflin_st_jeor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmrFormula::KatchMcArdle => "Katch-McArdle",
            BmrFormula::MifflinStJeor => "Mifflin-St Jeor",
        }
    }
}

/// Daily energy expenditure at one activity level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelEnergy {
    pub level: ActivityLevel,
    pub multiplier: f64,
    pub label: &'static str,
    /// kcal/day
    pub calories: f64,
}

/// Result of one estimation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyEstimate {
    /// Basal Metabolic Rate in kcal/day
    pub bmr: f64,
    /// Total Daily Energy Expenditure in kcal/day at the selected level
    pub tdee: f64,
    pub formula: BmrFormula,
    pub activity_level: ActivityLevel,
    pub activity_multiplier: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
    /// Present only for the Katch-McArdle branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lean_mass_kg: Option<f64>,
    /// `bmr * m` for every fixed multiplier, lowest first
    pub per_level: Vec<LevelEnergy>,
}

impl EnergyEstimate {
    /// TDEE for a given level from the per-level table
    pub fn calories_at(&self, level: ActivityLevel) -> Option<f64> {
        self.per_level
            .iter()
            .find(|entry| entry.level == level)
            .map(|entry| entry.calories)
    }

    /// Plain-text summary: BMR, TDEE, then the per-level table
    pub fn summary_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Formula: {}\n", self.formula.display_name()));
        out.push_str(&format!("BMR: {:.2} kcal/day\n", self.bmr));
        out.push_str(&format!(
            "TDEE: {:.2} kcal/day ({} x{})\n",
            self.tdee,
            self.activity_level.label(),
            self.activity_multiplier
        ));
        out.push('\n');
        for entry in &self.per_level {
            out.push_str(&format!(
                "  {:<32} x{:<6} {:>9.2} kcal/day\n",
                entry.label, entry.multiplier, entry.calories
            ));
        }
        out
    }
}
