//! Calculator MCP Tools
//!
//! Tool functions for validating calculator input and estimating BMR/TDEE.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::metabolism::{self, cm_to_feet_inches, kg_to_pounds, ValidationErrors};
use crate::models::{ActivityLevel, EnergyEstimate, Field, RawFields, RawValue, UnitSystem};

/// Response for validate_input
#[derive(Debug, Serialize)]
pub struct ValidateInputResponse {
    pub valid: bool,
    pub unit_system: String,
    pub errors: BTreeMap<Field, String>,
}

/// Body measurements echoed back in both unit systems
#[derive(Debug, Serialize)]
pub struct BodyMeasurements {
    pub weight_kg: f64,
    pub weight_lb: f64,
    pub height_cm: f64,
    pub height_ft: f64,
    pub height_in: f64,
}

/// Response for estimate_energy
#[derive(Debug, Serialize)]
pub struct EstimateEnergyResponse {
    pub valid: bool,
    pub unit_system: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<Field, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<BodyMeasurements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<EnergyEstimate>,
}

/// One row of list_activity_levels
#[derive(Debug, Serialize)]
pub struct ActivityLevelInfo {
    pub level: ActivityLevel,
    pub multiplier: f64,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ListActivityLevelsResponse {
    pub levels: Vec<ActivityLevelInfo>,
    pub total: usize,
}

/// Convert a JSON tool argument into a raw field value.
///
/// Numbers and strings pass through; `null` means absent. Anything else is
/// kept as text so the validator reports it as not a number.
pub fn raw_value_from_json(value: Option<Value>) -> Option<RawValue> {
    match value? {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().map_or_else(|| RawValue::Text(n.to_string()), RawValue::Number)),
        Value::String(s) => Some(RawValue::Text(s)),
        other => Some(RawValue::Text(other.to_string())),
    }
}

/// Convert a JSON tool argument into text for the enum-valued fields.
///
/// `null` means absent; non-string values keep their JSON spelling so the
/// validator reports them as unrecognized.
pub fn text_from_json(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Resolve the declared unit system, falling back to `default` when omitted
pub fn resolve_unit_system(
    unit_system: Option<&str>,
    default: UnitSystem,
) -> Result<UnitSystem, ValidationErrors> {
    match unit_system.map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => UnitSystem::from_str(s).ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.add(Field::UnitSystem, "Unit system must be metric or imperial");
            errors
        }),
    }
}

/// Validate raw calculator fields
pub fn validate_input(
    raw: &RawFields,
    unit_system: Option<&str>,
    default: UnitSystem,
) -> ValidateInputResponse {
    match resolve_unit_system(unit_system, default) {
        Ok(system) => {
            let report = metabolism::check(raw, system);
            ValidateInputResponse {
                valid: report.valid,
                unit_system: system.as_str().to_string(),
                errors: report.errors,
            }
        }
        Err(errors) => ValidateInputResponse {
            valid: false,
            unit_system: unit_system.unwrap_or_default().to_string(),
            errors: errors.into_map(),
        },
    }
}

/// Validate and, when valid, estimate BMR/TDEE
pub fn estimate_energy(
    raw: &RawFields,
    unit_system: Option<&str>,
    default: UnitSystem,
) -> EstimateEnergyResponse {
    let system = match resolve_unit_system(unit_system, default) {
        Ok(system) => system,
        Err(errors) => {
            return EstimateEnergyResponse {
                valid: false,
                unit_system: unit_system.unwrap_or_default().to_string(),
                errors: errors.into_map(),
                measurements: None,
                estimate: None,
            }
        }
    };

    let record = match metabolism::validate(raw, system) {
        Ok(record) => record,
        Err(errors) => {
            return EstimateEnergyResponse {
                valid: false,
                unit_system: system.as_str().to_string(),
                errors: errors.into_map(),
                measurements: None,
                estimate: None,
            }
        }
    };

    let normalized = record.normalize();
    let estimate = metabolism::estimate(&normalized);
    let (height_ft, height_in) = cm_to_feet_inches(normalized.height_cm());

    EstimateEnergyResponse {
        valid: true,
        unit_system: system.as_str().to_string(),
        errors: BTreeMap::new(),
        measurements: Some(BodyMeasurements {
            weight_kg: normalized.weight_kg(),
            weight_lb: kg_to_pounds(normalized.weight_kg()),
            height_cm: normalized.height_cm(),
            height_ft,
            height_in,
        }),
        estimate: Some(estimate),
    }
}

/// List the five fixed activity levels
pub fn list_activity_levels() -> ListActivityLevelsResponse {
    let levels: Vec<ActivityLevelInfo> = ActivityLevel::ALL
        .into_iter()
        .map(|level| ActivityLevelInfo {
            level,
            multiplier: level.multiplier(),
            label: level.label(),
        })
        .collect();

    let total = levels.len();
    ListActivityLevelsResponse { levels, total }
}
