//! Application context: owns everything a request needs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::artifacts::{ArtifactPaths, ArtifactState, Artifacts};
use crate::config::AppConfig;
use crate::error::{PredictError, PredictResult};
use crate::explore::{ExploreError, StudentDataset};
use crate::features::{FeatureAssembler, FeatureInput, ValidationPolicy};
use crate::inference::Prediction;
use crate::schema::FeatureSchema;

/// Artifacts, assembler and dataset location for one process.
///
/// Built once at start-up and passed by reference. Construction never
/// fails: if the artifacts cannot be loaded, prediction requests return
/// [`PredictError::ArtifactUnavailable`] while exploration keeps working.
#[derive(Debug, Clone)]
pub struct AppContext {
    schema: FeatureSchema,
    assembler: FeatureAssembler,
    artifacts: ArtifactState,
    dataset: PathBuf,
}

impl AppContext {
    /// Load artifacts and set up the request path from configuration.
    pub fn initialize(config: &AppConfig) -> Self {
        let schema = FeatureSchema::student();
        let paths = ArtifactPaths::new(&config.artifacts.scaler, &config.artifacts.model);
        let artifacts = ArtifactState::load(&paths, &schema);
        Self {
            schema,
            assembler: FeatureAssembler::new(config.validation.policy),
            artifacts,
            dataset: config.data.dataset.clone(),
        }
    }

    /// Build a context around artifacts that are already in memory.
    pub fn with_artifacts(
        artifacts: Artifacts,
        policy: ValidationPolicy,
        dataset: impl Into<PathBuf>,
    ) -> Self {
        Self {
            schema: FeatureSchema::student(),
            assembler: FeatureAssembler::new(policy),
            artifacts: ArtifactState::Ready(Arc::new(artifacts)),
            dataset: dataset.into(),
        }
    }

    /// Predict a GPA from named inputs.
    pub fn predict(&self, input: &FeatureInput) -> PredictResult<Prediction> {
        let artifacts = match &self.artifacts {
            ArtifactState::Ready(artifacts) => artifacts,
            ArtifactState::Unavailable { reason } => {
                return Err(PredictError::unavailable(reason.clone()));
            }
        };
        let vector = self.assembler.assemble(input)?;
        debug!(features = ?vector.as_slice(), "assembled feature vector");
        artifacts.pipeline().run(&vector)
    }

    /// Load the exploration dataset.
    pub fn explore(&self) -> Result<StudentDataset, ExploreError> {
        StudentDataset::load_csv(&self.dataset)
    }

    /// Whether prediction is available, and why not.
    pub fn artifact_status(&self) -> &ArtifactState {
        &self.artifacts
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.assembler.policy()
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{reference_linear_model, reference_scaler, sample_input};

    fn context() -> AppContext {
        let artifacts = Artifacts::from_parts(
            reference_scaler(),
            reference_linear_model(),
            &FeatureSchema::student(),
        )
        .unwrap();
        AppContext::with_artifacts(artifacts, ValidationPolicy::Strict, "unused.csv")
    }

    #[test]
    fn predicts_sample() {
        let p = context().predict(&sample_input()).unwrap();
        assert!(p.gpa.is_finite());
        assert!((0.0..=1.0).contains(&p.display_ratio));
    }

    #[test]
    fn schema_errors_surface() {
        let mut input = sample_input();
        input.remove("Age");
        let err = context().predict(&input).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn unavailable_artifacts() {
        let mut config = AppConfig::default();
        config.artifacts.scaler = "/no/such/scaler.json".into();
        config.artifacts.model = "/no/such/model.json".into();

        let ctx = AppContext::initialize(&config);
        assert!(!ctx.artifact_status().is_ready());
        assert!(matches!(
            ctx.predict(&sample_input()),
            Err(PredictError::ArtifactUnavailable { .. })
        ));
    }
}
