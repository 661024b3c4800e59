//! Fixtures and helpers shared by unit and integration tests.

mod cases;

use ndarray::{array, Array1};

use crate::features::FeatureInput;
use crate::repr::{
    Aggregation, ArtifactMeta, Forest, LinearModel, ModelArtifact, Scaler, ScalerArtifact,
    StandardScaler, Tree,
};
use crate::schema::Field;

pub use cases::{ExpectedError, PredictionCase, PredictionCases};

/// Tolerance for comparing predictions against stored expectations.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Directory holding the JSON/CSV fixtures of this crate.
pub fn test_cases_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases")
}

/// A complete, in-range request.
pub fn sample_input() -> FeatureInput {
    FeatureInput::new()
        .with("Age", 17)
        .with("Gender", 0)
        .with("Ethnicity", 1)
        .with("ParentalEducation", 2)
        .with("StudyTimeWeekly", 12.5)
        .with("Absences", 3)
        .with("Tutoring", 1)
        .with("ParentalSupport", 3)
        .with("Extracurricular", 1)
        .with("Sports", 0)
        .with("Music", 0)
        .with("Volunteering", 1)
}

fn reference_meta() -> ArtifactMeta {
    ArtifactMeta::new(Field::ALL.len())
        .with_feature_names(Field::ALL.iter().map(|f| f.name()))
        .with_producer("gradecast test fixture")
}

/// Standard scaler fitted on the student performance data.
///
/// Matches `tests/test-cases/artifacts/scaler.json`.
pub fn reference_scaler() -> ScalerArtifact {
    let mean: Array1<f64> = array![
        16.47, 0.51, 0.88, 1.75, 9.77, 14.54, 0.30, 2.12, 0.38, 0.30, 0.20, 0.16
    ];
    let scale: Array1<f64> = array![
        1.12, 0.50, 1.03, 1.00, 5.65, 8.47, 0.46, 1.12, 0.49, 0.46, 0.40, 0.36
    ];
    let scaler = StandardScaler::new(12, Some(mean), Some(scale))
        .expect("reference scaler parameters are valid");
    ScalerArtifact::new(Scaler::Standard(scaler)).with_meta(reference_meta())
}

/// Linear regressor on standardized features.
///
/// Matches `tests/test-cases/artifacts/model_linear.json`.
pub fn reference_linear_model() -> ModelArtifact {
    let coefficients = array![
        0.004, 0.007, 0.003, -0.005, 0.166, -0.838, 0.117, 0.172, 0.090, 0.085, 0.071, 0.001
    ];
    ModelArtifact::new(LinearModel::new(coefficients, 1.906)).with_meta(reference_meta())
}

/// Boosted stumps on study time and absences.
///
/// Matches `tests/test-cases/artifacts/model_forest.json`.
pub fn reference_forest_model() -> ModelArtifact {
    let stump = |feature: u32, threshold: f64, left: f64, right: f64| {
        Tree::new(
            vec![feature, 0, 0],
            vec![threshold, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![0.0, left, right],
        )
        .expect("reference stump is valid")
    };
    let forest = Forest::new(12, Aggregation::Sum { base_score: 1.906 })
        .with_tree(stump(Field::Absences.index() as u32, 0.0, 0.62, -0.71))
        .with_tree(stump(Field::StudyTimeWeekly.index() as u32, 0.0, -0.14, 0.17))
        .with_tree(stump(Field::ParentalSupport.index() as u32, -0.5, -0.2, 0.08));
    ModelArtifact::new(forest).with_meta(reference_meta())
}
