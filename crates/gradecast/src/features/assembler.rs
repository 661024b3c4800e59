//! Named inputs → typed record → positional feature vector.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PredictError, PredictResult, Violation};
use crate::schema::{Field, FieldKind};

use super::{FeatureInput, FeatureVector, RawValue, StudentRecord};

/// How strictly declared bounds are enforced.
///
/// Presence and type are always checked; a field without a value is never
/// filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Reject out-of-range values and unknown field names.
    #[default]
    Strict,
    /// Accept out-of-range values numerically; ignore unknown names.
    Lenient,
}

/// Converts named raw inputs into a [`FeatureVector`] in schema order.
///
/// # Example
///
/// ```
/// use gradecast::features::{FeatureAssembler, FeatureInput};
///
/// let input = FeatureInput::new()
///     .with("Age", 17)
///     .with("Gender", 0)
///     .with("Ethnicity", 1)
///     .with("ParentalEducation", 2)
///     .with("StudyTimeWeekly", 12.5)
///     .with("Absences", 3)
///     .with("Tutoring", 1)
///     .with("ParentalSupport", 3)
///     .with("Extracurricular", 1)
///     .with("Sports", 0)
///     .with("Music", 0)
///     .with("Volunteering", 1);
///
/// let vector = FeatureAssembler::default().assemble(&input).unwrap();
/// assert_eq!(vector.len(), 12);
/// assert_eq!(vector.as_slice()[4], 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureAssembler {
    policy: ValidationPolicy,
}

impl FeatureAssembler {
    /// Create an assembler with the given policy.
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// Active validation policy.
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Build the positional feature vector.
    pub fn assemble(&self, input: &FeatureInput) -> PredictResult<FeatureVector> {
        Ok(self.record(input)?.to_feature_vector())
    }

    /// Build the typed record without flattening it.
    pub fn record(&self, input: &FeatureInput) -> PredictResult<StudentRecord> {
        for (name, _) in input.iter() {
            if Field::from_name(name).is_none() {
                match self.policy {
                    ValidationPolicy::Strict => {
                        return Err(PredictError::violation(name, Violation::Unknown));
                    }
                    ValidationPolicy::Lenient => {
                        debug!(field = name, "ignoring unknown input field");
                    }
                }
            }
        }

        Ok(StudentRecord {
            age: self.integer(input, Field::Age)?,
            gender: self.integer(input, Field::Gender)?,
            ethnicity: self.integer(input, Field::Ethnicity)?,
            parental_education: self.integer(input, Field::ParentalEducation)?,
            study_time_weekly: self.continuous(input, Field::StudyTimeWeekly)?,
            absences: self.integer(input, Field::Absences)?,
            tutoring: self.integer(input, Field::Tutoring)?,
            parental_support: self.integer(input, Field::ParentalSupport)?,
            extracurricular: self.integer(input, Field::Extracurricular)?,
            sports: self.integer(input, Field::Sports)?,
            music: self.integer(input, Field::Music)?,
            volunteering: self.integer(input, Field::Volunteering)?,
        })
    }

    fn integer(&self, input: &FeatureInput, field: Field) -> PredictResult<i64> {
        let kind = field.kind();
        debug_assert!(kind.is_integral());
        let raw = lookup(input, field)?;
        let value = parse_integer(raw).ok_or_else(|| wrong_type(field, kind, raw))?;
        self.check_range(field, kind, value as f64)?;
        Ok(value)
    }

    fn continuous(&self, input: &FeatureInput, field: Field) -> PredictResult<f64> {
        let kind = field.kind();
        let raw = lookup(input, field)?;
        let value = parse_float(raw).ok_or_else(|| wrong_type(field, kind, raw))?;
        self.check_range(field, kind, value)?;
        Ok(value)
    }

    fn check_range(&self, field: Field, kind: FieldKind, value: f64) -> PredictResult<()> {
        if self.policy == ValidationPolicy::Lenient || kind.contains(value) {
            return Ok(());
        }
        let (min, max) = kind.bounds();
        Err(PredictError::violation(
            field.name(),
            Violation::OutOfRange { value, min, max },
        ))
    }
}

fn lookup(input: &FeatureInput, field: Field) -> PredictResult<&RawValue> {
    match input.get(field.name()) {
        None | Some(RawValue::Null) => {
            Err(PredictError::violation(field.name(), Violation::Missing))
        }
        Some(raw) => Ok(raw),
    }
}

fn wrong_type(field: Field, kind: FieldKind, raw: &RawValue) -> PredictError {
    PredictError::violation(
        field.name(),
        Violation::WrongType {
            expected: kind.type_name(),
            found: raw.describe(),
        },
    )
}

/// Largest magnitude an `f64` can hold while still being an exact `i64`.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

fn whole(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT)
        .then_some(value as i64)
}

fn parse_integer(raw: &RawValue) -> Option<i64> {
    match raw {
        RawValue::Int(v) => Some(*v),
        RawValue::Float(v) => whole(*v),
        RawValue::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        RawValue::Bool(_) | RawValue::Null | RawValue::Other(_) => None,
    }
}

fn parse_float(raw: &RawValue) -> Option<f64> {
    let value = match raw {
        RawValue::Int(v) => *v as f64,
        RawValue::Float(v) => *v,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Bool(_) | RawValue::Null | RawValue::Other(_) => return None,
    };
    value.is_finite().then_some(value)
}
