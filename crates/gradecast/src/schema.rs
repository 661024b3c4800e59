//! Feature schema definitions.
//!
//! This module defines the fixed, ordered feature layout that the scaler and
//! regression model were fitted on. Position `i` of every feature vector is
//! [`Field::ALL[i]`](Field::ALL); nothing else in the crate is allowed to
//! decide column order.

use std::fmt;

/// Number of features in the student schema.
pub const N_FEATURES: usize = 12;

// =============================================================================
// FieldKind
// =============================================================================

/// Logical kind of a schema field.
///
/// All values are encoded as `f64` in the feature vector. The kind decides
/// which raw inputs are accepted and what the declared bounds are.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    /// Whole number within an inclusive range.
    Integer { min: i64, max: i64 },

    /// Integer-coded category: valid codes are `0..levels`.
    Categorical { levels: u32 },

    /// Real number within an inclusive range.
    Continuous { min: f64, max: f64 },
}

impl FieldKind {
    /// Returns true if values of this kind must be whole numbers.
    #[inline]
    pub fn is_integral(&self) -> bool {
        !matches!(self, FieldKind::Continuous { .. })
    }

    /// Declared inclusive bounds as floats.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            FieldKind::Integer { min, max } => (min as f64, max as f64),
            FieldKind::Categorical { levels } => (0.0, levels.saturating_sub(1) as f64),
            FieldKind::Continuous { min, max } => (min, max),
        }
    }

    /// Check whether a value lies within the declared bounds.
    pub fn contains(&self, value: f64) -> bool {
        let (min, max) = self.bounds();
        value >= min && value <= max
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Integer { .. } => "integer",
            FieldKind::Categorical { .. } => "category code",
            FieldKind::Continuous { .. } => "number",
        }
    }
}

// =============================================================================
// Field
// =============================================================================

/// One column of the student feature schema.
///
/// Variants are declared in training-column order; the discriminant is the
/// column index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Age = 0,
    Gender = 1,
    Ethnicity = 2,
    ParentalEducation = 3,
    StudyTimeWeekly = 4,
    Absences = 5,
    Tutoring = 6,
    ParentalSupport = 7,
    Extracurricular = 8,
    Sports = 9,
    Music = 10,
    Volunteering = 11,
}

impl Field {
    /// All fields in training-column order.
    pub const ALL: [Field; N_FEATURES] = [
        Field::Age,
        Field::Gender,
        Field::Ethnicity,
        Field::ParentalEducation,
        Field::StudyTimeWeekly,
        Field::Absences,
        Field::Tutoring,
        Field::ParentalSupport,
        Field::Extracurricular,
        Field::Sports,
        Field::Music,
        Field::Volunteering,
    ];

    /// Column index of this field.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name, as it appears in the training data.
    pub fn name(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Ethnicity => "Ethnicity",
            Field::ParentalEducation => "ParentalEducation",
            Field::StudyTimeWeekly => "StudyTimeWeekly",
            Field::Absences => "Absences",
            Field::Tutoring => "Tutoring",
            Field::ParentalSupport => "ParentalSupport",
            Field::Extracurricular => "Extracurricular",
            Field::Sports => "Sports",
            Field::Music => "Music",
            Field::Volunteering => "Volunteering",
        }
    }

    /// Declared kind and bounds.
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Age => FieldKind::Integer { min: 15, max: 18 },
            Field::Gender => FieldKind::Categorical { levels: 2 },
            Field::Ethnicity => FieldKind::Categorical { levels: 4 },
            Field::ParentalEducation => FieldKind::Categorical { levels: 5 },
            Field::StudyTimeWeekly => FieldKind::Continuous { min: 0.0, max: 20.0 },
            Field::Absences => FieldKind::Integer { min: 0, max: 30 },
            Field::Tutoring => FieldKind::Categorical { levels: 2 },
            Field::ParentalSupport => FieldKind::Categorical { levels: 5 },
            Field::Extracurricular
            | Field::Sports
            | Field::Music
            | Field::Volunteering => FieldKind::Categorical { levels: 2 },
        }
    }

    /// Human-readable labels for categorical codes, indexed by code.
    ///
    /// Returns an empty slice for non-categorical fields.
    pub fn labels(self) -> &'static [&'static str] {
        const NO_YES: &[&str] = &["No", "Yes"];
        match self {
            Field::Gender => &["Male", "Female"],
            Field::Ethnicity => &["Caucasian", "African American", "Asian", "Other"],
            Field::ParentalEducation => {
                &["None", "High School", "Some College", "Bachelor's", "Higher"]
            }
            Field::ParentalSupport => &["None", "Low", "Moderate", "High", "Very High"],
            Field::Tutoring
            | Field::Extracurricular
            | Field::Sports
            | Field::Music
            | Field::Volunteering => NO_YES,
            Field::Age | Field::StudyTimeWeekly | Field::Absences => &[],
        }
    }

    /// Label for one categorical code, if the field has labels.
    pub fn label(self, code: i64) -> Option<&'static str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.labels().get(i))
            .copied()
    }

    /// Look up a field by its column name (exact match).
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// FeatureSchema
// =============================================================================

/// Metadata for a single schema column.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMeta {
    /// Column name.
    pub name: String,
    /// Declared kind and bounds.
    pub kind: FieldKind,
}

/// Ordered schema describing the feature vector layout.
#[derive(Clone, Debug)]
pub struct FeatureSchema {
    features: Vec<FeatureMeta>,
}

impl FeatureSchema {
    /// The 12-column student schema.
    pub fn student() -> Self {
        let features = Field::ALL
            .iter()
            .map(|f| FeatureMeta {
                name: f.name().to_string(),
                kind: f.kind(),
            })
            .collect();
        Self::from_features(features)
    }

    /// Create a schema from explicit column metadata.
    pub fn from_features(features: Vec<FeatureMeta>) -> Self {
        Self { features }
    }

    /// Number of columns.
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// Metadata for a column by index.
    pub fn get(&self, index: usize) -> Option<&FeatureMeta> {
        self.features.get(index)
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|m| m.name.as_str())
    }

    /// Iterate over column metadata.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureMeta> {
        self.features.iter()
    }

    /// Compare an artifact's recorded feature names against this schema.
    ///
    /// Returns the first position where they disagree, if any. A length
    /// difference is reported at the first index past the shorter list.
    pub fn first_name_mismatch<S: AsRef<str>>(&self, names: &[S]) -> Option<NameMismatch> {
        let n = self.n_features().max(names.len());
        (0..n).find_map(|i| {
            let expected = self.features.get(i).map(|m| m.name.as_str());
            let found = names.get(i).map(|s| s.as_ref());
            (expected != found).then(|| NameMismatch {
                index: i,
                expected: expected.map(str::to_string),
                found: found.map(str::to_string),
            })
        })
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::student()
    }
}

/// First disagreement between an artifact's feature names and the schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameMismatch {
    pub index: usize,
    pub expected: Option<String>,
    pub found: Option<String>,
}

impl fmt::Display for NameMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column {}: expected {}, found {}",
            self.index,
            self.expected.as_deref().unwrap_or("<end of schema>"),
            self.found.as_deref().unwrap_or("<end of list>")
        )
    }
}
