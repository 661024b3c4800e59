use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::error::PredictError;
use crate::features::FeatureInput;

/// Expected failure of a prediction case.
///
/// `stage` uses the [`Stage`](crate::error::Stage) display strings; `field`
/// is checked only for schema violations.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedError {
    pub stage: String,
    #[serde(default)]
    pub field: Option<String>,
}

impl ExpectedError {
    /// Returns true if `err` matches this expectation.
    pub fn matches(&self, err: &PredictError) -> bool {
        if err.stage().to_string() != self.stage {
            return false;
        }
        match (&self.field, err) {
            (Some(expected), PredictError::SchemaViolation { field, .. }) => expected == field,
            (Some(_), _) => false,
            (None, _) => true,
        }
    }
}

/// One request with its expected outcome, loaded from JSON.
///
/// ```json
/// { "name": "sample", "input": { "Age": 17, ... }, "expected_gpa": 3.27 }
/// { "name": "bad", "input": { ... }, "expected_error": { "stage": "input validation", "field": "Age" } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionCase {
    pub name: String,
    pub input: FeatureInput,
    #[serde(default)]
    pub expected_gpa: Option<f64>,
    #[serde(default)]
    pub expected_error: Option<ExpectedError>,
}

/// A named set of cases for one scaler/model pair.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionCases {
    /// Scaler artifact file, relative to the cases file.
    pub scaler: String,
    /// Model artifact file, relative to the cases file.
    pub model: String,
    pub cases: Vec<PredictionCase>,
}

impl PredictionCases {
    /// Load a cases file.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be opened or parsed.
    pub fn load(path: &Path) -> Self {
        let file =
            File::open(path).unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()));
        serde_json::from_reader(file)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
    }
}
