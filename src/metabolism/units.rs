//! Unit conversion constants
//!
//! Standard conversion factors between imperial and metric body measurements.

// ============================================================================
// Weight Conversion Constants
// ============================================================================

/// Kilograms per avoirdupois pound (exact, by definition)
pub const KG_PER_LB: f64 = 0.45359237;

// ============================================================================
// Length Conversion Constants
// ============================================================================

/// Centimeters per inch (exact, by definition)
pub const CM_PER_IN: f64 = 2.54;
/// Inches per foot
pub const IN_PER_FT: f64 = 12.0;

// ============================================================================
// Validation Bounds
// ============================================================================

/// Minimum metric height accepted by the validator
pub const MIN_HEIGHT_CM: f64 = 30.0;
/// Minimum feet component of an imperial height
pub const MIN_HEIGHT_FT: f64 = 1.0;
/// Inches component of an imperial height is within [0, 11]
pub const MIN_HEIGHT_IN: f64 = 0.0;
pub const MAX_HEIGHT_IN: f64 = 11.0;
/// Body fat percentage is within [0, 100]
pub const MIN_BODY_FAT_PERCENT: f64 = 0.0;
pub const MAX_BODY_FAT_PERCENT: f64 = 100.0;
/// Upper bound on weight, age and the height components, in the entered unit.
/// Keeps every BMR term and every TDEE product finite.
pub const MAX_MEASUREMENT: f64 = 1.0e6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_foot_in_cm() {
        assert!((IN_PER_FT * CM_PER_IN - 30.48).abs() < 1e-12);
    }

    #[test]
    fn test_one_kg_in_pounds() {
        assert!((1.0 / KG_PER_LB - 2.20462262).abs() < 1e-8);
    }
}
