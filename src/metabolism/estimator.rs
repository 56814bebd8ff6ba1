//! BMR and TDEE estimation
//!
//! Pure calculation over a [`NormalizedInput`]. The validator guarantees the
//! input is in range, so there is no error path here.
//!
//! # References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy
//!   expenditure. *American Journal of Clinical Nutrition*, 51(2), 241-247.
//! - McArdle, W.D., Katch, F.I., & Katch, V.L. (2010). *Exercise Physiology*.

use crate::models::{
    ActivityLevel, BmrFormula, EnergyEstimate, Gender, LevelEnergy, NormalizedInput, RawFields,
    UnitSystem,
};

use super::validator::{validate, ValidationErrors};

// ============================================================================
// Katch-McArdle Coefficients
// ============================================================================

/// Katch-McArdle intercept (kcal/day)
pub const KM_INTERCEPT: f64 = 370.0;
/// Katch-McArdle lean mass coefficient (kcal/day per kg)
pub const KM_LEAN_MASS_COEF: f64 = 21.6;

// ============================================================================
// Mifflin-St Jeor Coefficients
// ============================================================================

pub const MSJ_WEIGHT_COEF: f64 = 10.0;
pub const MSJ_HEIGHT_COEF: f64 = 6.25;
pub const MSJ_AGE_COEF: f64 = 5.0;
pub const MSJ_MALE_CONSTANT: f64 = 5.0;
pub const MSJ_FEMALE_CONSTANT: f64 = -161.0;

/// Lean body mass in kg for a body fat percentage
pub fn lean_mass_kg(weight_kg: f64, body_fat_percent: f64) -> f64 {
    weight_kg * (1.0 - body_fat_percent / 100.0)
}

/// Katch-McArdle: BMR = 370 + 21.6 x lean mass
pub fn katch_mcardle(lean_mass_kg: f64) -> f64 {
    KM_INTERCEPT + KM_LEAN_MASS_COEF * lean_mass_kg
}

/// Mifflin-St Jeor: BMR = 10 x weight + 6.25 x height - 5 x age + s,
/// where s is +5 for men and -161 for women
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: f64, gender: Gender) -> f64 {
    let gender_constant = match gender {
        Gender::Male => MSJ_MALE_CONSTANT,
        Gender::Female => MSJ_FEMALE_CONSTANT,
    };

    MSJ_WEIGHT_COEF * weight_kg + MSJ_HEIGHT_COEF * height_cm - MSJ_AGE_COEF * age
        + gender_constant
}

/// TDEE = BMR x activity multiplier
pub fn tdee(bmr: f64, level: ActivityLevel) -> f64 {
    bmr * level.multiplier()
}

/// Estimate BMR, TDEE and the per-level table.
///
/// Known body fat selects Katch-McArdle (gender and age unused); otherwise
/// Mifflin-St Jeor. A body fat of 0 counts as known.
///
/// # Panics
///
/// Panics if the BMR, the TDEE or any per-level value is not finite.
/// Validated input cannot produce one, so this means the caller skipped
/// validation.
pub fn estimate(input: &NormalizedInput) -> EnergyEstimate {
    let weight_kg = input.weight_kg();
    let height_cm = input.height_cm();

    let (formula, bmr, lean_mass) = match input.body_fat() {
        Some(body_fat) => {
            let lean = lean_mass_kg(weight_kg, body_fat);
            (BmrFormula::KatchMcArdle, katch_mcardle(lean), Some(lean))
        }
        None => (
            BmrFormula::MifflinStJeor,
            mifflin_st_jeor(weight_kg, height_cm, input.age(), input.gender()),
            None,
        ),
    };

    let level = input.activity_level();
    let per_level: Vec<LevelEnergy> = ActivityLevel::ALL
        .into_iter()
        .map(|m| LevelEnergy {
            level: m,
            multiplier: m.multiplier(),
            label: m.label(),
            calories: tdee(bmr, m),
        })
        .collect();
    let selected_tdee = tdee(bmr, level);

    assert!(
        bmr.is_finite()
            && selected_tdee.is_finite()
            && per_level.iter().all(|entry| entry.calories.is_finite()),
        "non-finite energy from {:?}; estimate() requires validated input",
        input
    );

    tracing::debug!(formula = formula.as_str(), bmr, level = level.as_str(), "estimated energy expenditure");

    EnergyEstimate {
        bmr,
        tdee: selected_tdee,
        formula,
        activity_level: level,
        activity_multiplier: level.multiplier(),
        weight_kg,
        height_cm,
        lean_mass_kg: lean_mass,
        per_level,
    }
}

/// Validate, normalize and estimate in one step
pub fn estimate_raw(
    raw: &RawFields,
    unit_system: UnitSystem,
) -> Result<EnergyEstimate, ValidationErrors> {
    let record = validate(raw, unit_system)?;
    Ok(estimate(&record.normalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolism::converter::{cm_to_feet_inches, kg_to_pounds};
    use crate::metabolism::units::MAX_MEASUREMENT;
    use crate::models::{Field, HeightSpec, InputRecord, RawValue};

    fn metric(weight: f64, height_cm: f64, age: f64, gender: &str, body_fat: Option<f64>, level: f64) -> RawFields {
        RawFields {
            weight: Some(weight.into()),
            height_cm: Some(height_cm.into()),
            age: Some(age.into()),
            gender: Some(gender.to_string()),
            body_fat: body_fat.map(RawValue::from),
            activity_level: Some(level.into()),
            ..Default::default()
        }
    }

    fn run(raw: &RawFields, unit_system: UnitSystem) -> EnergyEstimate {
        estimate_raw(raw, unit_system).expect("fixture should validate")
    }

    fn relative_error(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn test_mifflin_male_scenario() {
        let result = run(&metric(70.0, 175.0, 30.0, "male", None, 1.55), UnitSystem::Metric);
        assert_eq!(result.formula, BmrFormula::MifflinStJeor);
        assert!((result.bmr - 1648.75).abs() < 1e-9);
        assert!((result.tdee - 2555.5625).abs() < 1e-9);
        assert_eq!(result.lean_mass_kg, None);
        assert_eq!(result.activity_level, ActivityLevel::Moderate);
    }

    #[test]
    fn test_mifflin_female_offset() {
        let male = run(&metric(70.0, 175.0, 30.0, "male", None, 1.2), UnitSystem::Metric);
        let female = run(&metric(70.0, 175.0, 30.0, "female", None, 1.2), UnitSystem::Metric);
        assert!((female.bmr - 1482.75).abs() < 1e-9);
        assert!((male.bmr - female.bmr - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_katch_mcardle_scenario() {
        let result = run(&metric(70.0, 175.0, 30.0, "male", Some(20.0), 1.2), UnitSystem::Metric);
        assert_eq!(result.formula, BmrFormula::KatchMcArdle);
        assert!((result.lean_mass_kg.unwrap() - 56.0).abs() < 1e-9);
        assert!((result.bmr - 1579.6).abs() < 1e-9);
    }

    #[test]
    fn test_katch_mcardle_ignores_gender_and_age() {
        let a = run(&metric(80.0, 180.0, 25.0, "male", Some(15.0), 1.375), UnitSystem::Metric);
        let b = run(&metric(80.0, 150.0, 70.0, "female", Some(15.0), 1.375), UnitSystem::Metric);
        assert_eq!(a.bmr, b.bmr);
        assert_eq!(a.tdee, b.tdee);
    }

    #[test]
    fn test_zero_body_fat_uses_katch_mcardle() {
        let result = run(&metric(70.0, 175.0, 30.0, "female", Some(0.0), 1.2), UnitSystem::Metric);
        assert_eq!(result.formula, BmrFormula::KatchMcArdle);
        assert!((result.bmr - (370.0 + 21.6 * 70.0)).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_and_table_identities() {
        let result = run(&metric(92.3, 188.0, 41.0, "male", None, 1.725), UnitSystem::Metric);
        assert_eq!(result.tdee, result.bmr * 1.725);
        assert_eq!(result.activity_multiplier, 1.725);
        assert_eq!(result.per_level.len(), 5);
        for (entry, level) in result.per_level.iter().zip(ActivityLevel::ALL) {
            assert_eq!(entry.level, level);
            assert_eq!(entry.calories, result.bmr * level.multiplier());
        }
        assert_eq!(result.calories_at(ActivityLevel::Intense), Some(result.tdee));
    }

    #[test]
    fn test_table_independent_of_selected_level() {
        let low = run(&metric(70.0, 175.0, 30.0, "male", None, 1.2), UnitSystem::Metric);
        let high = run(&metric(70.0, 175.0, 30.0, "male", None, 1.9), UnitSystem::Metric);
        assert_eq!(low.per_level, high.per_level);
        assert_ne!(low.tdee, high.tdee);
    }

    #[test]
    fn test_deterministic() {
        let raw = metric(63.7, 162.4, 47.0, "female", None, 1.375);
        let first = run(&raw, UnitSystem::Metric);
        for _ in 0..10 {
            let again = run(&raw, UnitSystem::Metric);
            assert_eq!(first.bmr.to_bits(), again.bmr.to_bits());
            assert_eq!(first.tdee.to_bits(), again.tdee.to_bits());
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_imperial_matches_metric_equivalent() {
        for body_fat in [None, Some(22.5)] {
            let pounds = 165.0;
            let (feet, inches) = (5.0, 10.0);

            let imperial = RawFields {
                weight: Some(pounds.into()),
                height_ft: Some(feet.into()),
                height_in: Some(inches.into()),
                age: Some(35.0.into()),
                gender: Some("male".to_string()),
                body_fat: body_fat.map(RawValue::from),
                activity_level: Some(1.55.into()),
                ..Default::default()
            };
            let metric_equivalent = metric(
                pounds * 0.45359237,
                (feet * 12.0 + inches) * 2.54,
                35.0,
                "male",
                body_fat,
                1.55,
            );

            let a = run(&imperial, UnitSystem::Imperial);
            let b = run(&metric_equivalent, UnitSystem::Metric);
            assert!(relative_error(a.bmr, b.bmr) <= 1e-9);
            assert!(relative_error(a.tdee, b.tdee) <= 1e-9);
        }
    }

    #[test]
    fn test_metric_round_trip_through_imperial_units() {
        let kg = 72.0;
        let cm = 178.0;
        let (feet, inches) = cm_to_feet_inches(cm);

        let imperial = RawFields {
            weight: Some(kg_to_pounds(kg).into()),
            height_ft: Some(feet.into()),
            height_in: Some(inches.into()),
            age: Some(28.0.into()),
            gender: Some("female".to_string()),
            activity_level: Some(1.2.into()),
            ..Default::default()
        };

        let a = run(&imperial, UnitSystem::Imperial);
        let b = run(&metric(kg, cm, 28.0, "female", None, 1.2), UnitSystem::Metric);
        assert!(relative_error(a.bmr, b.bmr) <= 1e-9);
    }

    #[test]
    fn test_estimate_raw_rejects_invalid_input() {
        let raw = metric(70.0, 29.9, 30.0, "male", None, 1.55);
        let errors = estimate_raw(&raw, UnitSystem::Metric).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_largest_accepted_input_stays_finite() {
        let raw = metric(MAX_MEASUREMENT, MAX_MEASUREMENT, 1.0, "male", None, 1.9);
        let result = run(&raw, UnitSystem::Metric);
        assert!(result.bmr.is_finite());
        assert!(result.tdee.is_finite());
        assert!(result.per_level.iter().all(|entry| entry.calories.is_finite()));

        let mut imperial = RawFields {
            weight: Some(MAX_MEASUREMENT.into()),
            height_ft: Some(MAX_MEASUREMENT.into()),
            height_in: Some(11.0.into()),
            age: Some(MAX_MEASUREMENT.into()),
            gender: Some("female".to_string()),
            activity_level: Some(1.9.into()),
            ..Default::default()
        };
        assert!(run(&imperial, UnitSystem::Imperial).tdee.is_finite());

        imperial.body_fat = Some(0.0.into());
        assert!(run(&imperial, UnitSystem::Imperial).tdee.is_finite());
    }

    #[test]
    fn test_huge_weight_and_age_are_rejected_before_estimation() {
        let errors = estimate_raw(&metric(1e308, 175.0, 30.0, "male", None, 1.55), UnitSystem::Metric)
            .unwrap_err();
        assert!(errors.contains(Field::Weight));

        let errors = estimate_raw(&metric(1e307, 175.0, 30.0, "male", None, 1.9), UnitSystem::Metric)
            .unwrap_err();
        assert!(errors.contains(Field::Weight));

        let errors = estimate_raw(&metric(70.0, 175.0, 1e308, "female", None, 1.2), UnitSystem::Metric)
            .unwrap_err();
        assert!(errors.contains(Field::Age));
    }

    #[test]
    #[should_panic(expected = "non-finite energy")]
    fn test_unvalidated_overflow_panics() {
        let record = InputRecord {
            weight: 1e307,
            height: HeightSpec::Metric { cm: 175.0 },
            age: 30.0,
            gender: Gender::Male,
            body_fat: None,
            activity_level: ActivityLevel::Athlete,
        };
        estimate(&record.normalize());
    }

    #[test]
    fn test_formula_helpers() {
        assert!((lean_mass_kg(70.0, 20.0) - 56.0).abs() < 1e-9);
        assert!((katch_mcardle(56.0) - 1579.6).abs() < 1e-9);
        assert!((mifflin_st_jeor(70.0, 175.0, 30.0, Gender::Male) - 1648.75).abs() < 1e-9);
        assert!((tdee(1000.0, ActivityLevel::Athlete) - 1900.0).abs() < 1e-9);
    }
}
