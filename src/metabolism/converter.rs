//! Unit conversion functions
//!
//! Converts imperial body measurements to kilograms and centimeters.

use super::units::{CM_PER_IN, IN_PER_FT, KG_PER_LB};

/// Convert pounds to kilograms
pub fn pounds_to_kg(pounds: f64) -> f64 {
    pounds * KG_PER_LB
}

/// Convert kilograms to pounds
pub fn kg_to_pounds(kg: f64) -> f64 {
    kg / KG_PER_LB
}

/// Convert a feet + inches height to centimeters
///
/// Examples:
/// - 5 ft 9 in -> 69 in -> 175.26 cm
/// - 6 ft 0 in -> 72 in -> 182.88 cm
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    (feet * IN_PER_FT + inches) * CM_PER_IN
}

/// Split a centimeter height into whole feet and remaining inches
pub fn cm_to_feet_inches(cm: f64) -> (f64, f64) {
    let total_inches = cm / CM_PER_IN;
    let feet = (total_inches / IN_PER_FT).floor();
    (feet, total_inches - feet * IN_PER_FT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds_to_kg() {
        assert!((pounds_to_kg(1.0) - 0.45359237).abs() < 1e-12);
        assert!((pounds_to_kg(150.0) - 68.0388555).abs() < 1e-6);
        assert_eq!(pounds_to_kg(0.0), 0.0);
    }

    #[test]
    fn test_kg_to_pounds_inverts() {
        let kg = 70.0;
        assert!((pounds_to_kg(kg_to_pounds(kg)) - kg).abs() < 1e-9);
    }

    #[test]
    fn test_feet_inches_to_cm() {
        assert!((feet_inches_to_cm(5.0, 9.0) - 175.26).abs() < 1e-9);
        assert!((feet_inches_to_cm(6.0, 0.0) - 182.88).abs() < 1e-9);
        assert!((feet_inches_to_cm(1.0, 0.0) - 30.48).abs() < 1e-9);
    }

    #[test]
    fn test_cm_to_feet_inches() {
        let (feet, inches) = cm_to_feet_inches(175.26);
        assert_eq!(feet, 5.0);
        assert!((inches - 9.0).abs() < 1e-9);
    }
}
