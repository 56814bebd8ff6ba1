//! Metabolic rate calculation module
//!
//! Validation, unit conversion and BMR/TDEE estimation.

pub mod converter;
pub mod estimator;
pub mod units;
pub mod validator;

pub use converter::{cm_to_feet_inches, feet_inches_to_cm, kg_to_pounds, pounds_to_kg};
pub use estimator::{estimate, estimate_raw};
pub use validator::{check, validate, ValidationErrors, ValidationReport};
