//! Typed student record.

use serde::{Deserialize, Serialize};

use crate::schema::{Field, N_FEATURES};

use super::FeatureVector;

/// One student's inputs, keyed by name.
///
/// Integer and categorical fields are kept as `i64` so that lenient
/// validation can carry out-of-range codes through unchanged. The record is
/// only flattened into a positional [`FeatureVector`] at the transform
/// boundary, via [`to_feature_vector`](Self::to_feature_vector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentRecord {
    pub age: i64,
    pub gender: i64,
    pub ethnicity: i64,
    pub parental_education: i64,
    pub study_time_weekly: f64,
    pub absences: i64,
    pub tutoring: i64,
    pub parental_support: i64,
    pub extracurricular: i64,
    pub sports: i64,
    pub music: i64,
    pub volunteering: i64,
}

impl StudentRecord {
    /// Numeric value of a field.
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Age => self.age as f64,
            Field::Gender => self.gender as f64,
            Field::Ethnicity => self.ethnicity as f64,
            Field::ParentalEducation => self.parental_education as f64,
            Field::StudyTimeWeekly => self.study_time_weekly,
            Field::Absences => self.absences as f64,
            Field::Tutoring => self.tutoring as f64,
            Field::ParentalSupport => self.parental_support as f64,
            Field::Extracurricular => self.extracurricular as f64,
            Field::Sports => self.sports as f64,
            Field::Music => self.music as f64,
            Field::Volunteering => self.volunteering as f64,
        }
    }

    /// Flatten into schema order.
    pub fn to_feature_vector(&self) -> FeatureVector {
        let values: Vec<f64> = Field::ALL.iter().map(|&f| self.value(f)).collect();
        debug_assert_eq!(values.len(), N_FEATURES);
        FeatureVector::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StudentRecord {
        StudentRecord {
            age: 17,
            gender: 0,
            ethnicity: 1,
            parental_education: 2,
            study_time_weekly: 12.5,
            absences: 3,
            tutoring: 1,
            parental_support: 3,
            extracurricular: 1,
            sports: 0,
            music: 0,
            volunteering: 1,
        }
    }

    #[test]
    fn flattens_in_schema_order() {
        let v = record().to_feature_vector();
        assert_eq!(
            v.as_slice(),
            &[17.0, 0.0, 1.0, 2.0, 12.5, 3.0, 1.0, 3.0, 1.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn serde_uses_column_names() {
        let json = serde_json::to_value(record()).unwrap();
        for field in Field::ALL {
            assert!(json.get(field.name()).is_some(), "missing {field}");
        }
        let back: StudentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record());
    }
}
