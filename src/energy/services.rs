//! Energy expenditure estimates.
//!
//! BMR uses the Mifflin-St Jeor equation (Mifflin et al., 1990):
//! `10·weight + 6.25·height − 5·age + 5` for men and `… − 161` otherwise.
//! TDEE scales BMR by an activity multiplier. Every derived figure is computed
//! from the unrounded intermediate and rounded once, at the end.

use thiserror::Error;
use tracing::{debug, warn};

use super::dto::{ActivityLevel, BiometricInput, CalculateBmrRequest, EnergyEstimate, Gender};

const MILD_LOSS_FACTOR: f64 = 0.9;
const WEIGHT_LOSS_FACTOR: f64 = 0.8;
const WEIGHT_GAIN_FACTOR: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
}

fn required_number(value: Option<f64>) -> Result<f64, ValidationError> {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => Ok(v),
        _ => Err(ValidationError::MissingFields),
    }
}

fn required_text(value: Option<&str>) -> Result<&str, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingFields),
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive(field))
    }
}

impl TryFrom<&CalculateBmrRequest> for BiometricInput {
    type Error = ValidationError;

    fn try_from(req: &CalculateBmrRequest) -> Result<Self, Self::Error> {
        let age = required_number(req.age)?;
        let weight = required_number(req.weight)?;
        let height = required_number(req.height)?;
        let gender = required_text(req.gender.as_deref())?;
        let activity = required_text(req.activity.as_deref())?;

        // whole years, like an integer form field
        let age = positive("age", age.trunc())?;
        let weight_kg = positive("weight", weight)?;
        let height_cm = positive("height", height)?;

        let activity = ActivityLevel::from_key(activity).unwrap_or_else(|| {
            warn!(activity, "unknown activity level, using sedentary");
            ActivityLevel::Sedentary
        });

        Ok(Self {
            age: age as u32,
            weight_kg,
            height_cm,
            gender: Gender::from_key(gender),
            activity,
        })
    }
}

pub fn mifflin_st_jeor(input: &BiometricInput) -> f64 {
    let base = 10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * f64::from(input.age);
    match input.gender {
        Gender::Male => base + 5.0,
        Gender::Other => base - 161.0,
    }
}

fn kcal(value: f64) -> i64 {
    value.round() as i64
}

pub fn compute_energy(input: &BiometricInput) -> EnergyEstimate {
    let bmr = mifflin_st_jeor(input);
    let tdee = bmr * input.activity.multiplier();
    debug!(bmr, tdee, activity = input.activity.key(), "energy computed");
    EnergyEstimate {
        bmr: kcal(bmr),
        tdee: kcal(tdee),
        maintenance: kcal(tdee),
        mild_loss: kcal(tdee * MILD_LOSS_FACTOR),
        weight_loss: kcal(tdee * WEIGHT_LOSS_FACTOR),
        weight_gain: kcal(tdee * WEIGHT_GAIN_FACTOR),
    }
}

/// Validates a raw request and computes the estimate.
pub fn calculate(req: &CalculateBmrRequest) -> Result<EnergyEstimate, ValidationError> {
    let input = BiometricInput::try_from(req)?;
    Ok(compute_energy(&input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(gender: &str, activity: &str) -> CalculateBmrRequest {
        CalculateBmrRequest {
            age: Some(25.0),
            weight: Some(70.0),
            height: Some(175.0),
            gender: Some(gender.into()),
            activity: Some(activity.into()),
        }
    }

    #[test]
    fn male_moderate_rounds_from_unrounded_bmr() {
        let est = calculate(&request("male", "moderate")).unwrap();
        // 1673.75 -> 1674, and 1673.75 * 1.55 = 2594.3125 -> 2594
        assert_eq!(est.bmr, 1674);
        assert_eq!(est.tdee, 2594);
        assert_eq!(est.maintenance, 2594);
        assert_eq!(est.mild_loss, 2335);
        assert_eq!(est.weight_loss, 2075);
        assert_eq!(est.weight_gain, 2854);
    }

    #[test]
    fn non_male_uses_lower_offset() {
        let req = CalculateBmrRequest {
            age: Some(25.0),
            weight: Some(60.0),
            height: Some(165.0),
            gender: Some("female".into()),
            activity: Some("sedentary".into()),
        };
        let est = calculate(&req).unwrap();
        assert_eq!(est.bmr, 1345);
        assert_eq!(est.tdee, 1614);
    }

    #[test]
    fn multipliers_match_table() {
        let expected = [
            ("sedentary", 2009),
            ("light", 2301),
            ("moderate", 2594),
            ("active", 2887),
            ("veryActive", 3180),
        ];
        for (activity, tdee) in expected {
            let est = calculate(&request("male", activity)).unwrap();
            assert_eq!(est.tdee, tdee, "{activity}");
        }
    }

    #[test]
    fn unknown_activity_falls_back_to_sedentary() {
        let est = calculate(&request("male", "couch")).unwrap();
        assert_eq!(est.tdee, 2009);
    }

    #[test]
    fn gender_and_activity_keys_are_case_sensitive() {
        let est = calculate(&request("Male", "Moderate")).unwrap();
        // non-male offset, sedentary: 1507.75 -> 1508, 1507.75 * 1.2 = 1809.3 -> 1809
        assert_eq!(est.bmr, 1508);
        assert_eq!(est.tdee, 1809);

        assert_eq!(calculate(&request("male", "VeryActive")).unwrap().tdee, 2009);
    }

    #[test]
    fn any_missing_or_falsy_field_is_rejected() {
        let base = request("male", "moderate");
        let cases = [
            CalculateBmrRequest { age: None, ..base.clone() },
            CalculateBmrRequest { age: Some(0.0), ..base.clone() },
            CalculateBmrRequest { weight: None, ..base.clone() },
            CalculateBmrRequest { weight: Some(0.0), ..base.clone() },
            CalculateBmrRequest { height: None, ..base.clone() },
            CalculateBmrRequest { gender: None, ..base.clone() },
            CalculateBmrRequest { gender: Some(String::new()), ..base.clone() },
            CalculateBmrRequest { activity: None, ..base.clone() },
            CalculateBmrRequest { activity: Some(String::new()), ..base.clone() },
        ];
        for req in cases {
            assert_eq!(calculate(&req), Err(ValidationError::MissingFields), "{req:?}");
        }
    }

    #[test]
    fn negative_values_are_rejected() {
        let req = CalculateBmrRequest {
            weight: Some(-70.0),
            ..request("male", "moderate")
        };
        assert_eq!(calculate(&req), Err(ValidationError::NotPositive("weight")));
    }

    #[test]
    fn is_pure() {
        let req = request("other", "active");
        assert_eq!(calculate(&req), calculate(&req));
    }
}
