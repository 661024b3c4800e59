//! Loading the fitted scaler/model pair at start-up.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::inference::InferencePipeline;
use crate::persist::{self, ArtifactKind, ReadError};
use crate::repr::{
    ArtifactMeta, ModelArtifact, ModelValidationError, RegressionModel, Scaler, ScalerArtifact,
    ScalerValidationError,
};
use crate::schema::{FeatureSchema, NameMismatch};

/// Where the two artifacts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    pub fn new(scaler: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        Self {
            scaler: scaler.into(),
            model: model.into(),
        }
    }
}

/// Errors while loading artifacts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load {kind} from {path}: {source}")]
    Read {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("{kind} feature names disagree with the input schema ({mismatch})")]
    FeatureNames {
        kind: ArtifactKind,
        mismatch: NameMismatch,
    },

    #[error("invalid scaler: {0}")]
    InvalidScaler(#[source] ScalerValidationError),

    #[error("invalid model: {0}")]
    InvalidModel(#[source] ModelValidationError),
}

/// A loaded, mutually checked scaler/model pair.
///
/// Immutable once built; share it behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct Artifacts {
    scaler: ScalerArtifact,
    model: ModelArtifact,
}

impl Artifacts {
    /// Pair already loaded artifacts, checking them against `schema`.
    ///
    /// Both artifacts are structurally validated, so a pair built in code
    /// cannot index past its input row at request time. Recorded feature
    /// names must match the schema exactly. Width
    /// disagreements without names are only logged: requests will then
    /// fail at the scaling or prediction stage.
    pub fn from_parts(
        scaler: ScalerArtifact,
        model: ModelArtifact,
        schema: &FeatureSchema,
    ) -> Result<Self, LoadError> {
        scaler.scaler.validate().map_err(LoadError::InvalidScaler)?;
        model.model.validate().map_err(LoadError::InvalidModel)?;
        check_names(ArtifactKind::Scaler, &scaler.meta, schema)?;
        check_names(ArtifactKind::Model, &model.meta, schema)?;

        let n_schema = schema.n_features();
        let n_scaler = scaler.scaler.n_features();
        let n_model = model.model.n_features();
        if n_scaler != n_schema {
            warn!(
                expected = n_schema,
                actual = n_scaler,
                "scaler width differs from the input schema"
            );
        }
        if n_model != n_scaler {
            warn!(
                scaler = n_scaler,
                model = n_model,
                "model width differs from scaler output"
            );
        }

        Ok(Self { scaler, model })
    }

    /// Read both artifacts from disk.
    pub fn load(paths: &ArtifactPaths, schema: &FeatureSchema) -> Result<Self, LoadError> {
        let scaler = read(ArtifactKind::Scaler, &paths.scaler, |p| persist::load_scaler(p))?;
        let model = read(ArtifactKind::Model, &paths.model, |p| persist::load_model(p))?;
        info!(
            scaler = scaler.scaler.kind_name(),
            model = model.model.kind_name(),
            n_features = model.model.n_features(),
            producer = model.meta.producer.as_deref().unwrap_or("unknown"),
            "loaded prediction artifacts"
        );
        Self::from_parts(scaler, model, schema)
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler.scaler
    }

    pub fn model(&self) -> &RegressionModel {
        &self.model.model
    }

    pub fn scaler_meta(&self) -> &ArtifactMeta {
        &self.scaler.meta
    }

    pub fn model_meta(&self) -> &ArtifactMeta {
        &self.model.meta
    }

    /// Borrowing pipeline over this pair.
    pub fn pipeline(&self) -> InferencePipeline<'_, Scaler, RegressionModel> {
        InferencePipeline::new(self.scaler(), self.model())
    }
}

fn read<T>(
    kind: ArtifactKind,
    path: &Path,
    load: impl FnOnce(&Path) -> Result<T, ReadError>,
) -> Result<T, LoadError> {
    load(path).map_err(|source| LoadError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

fn check_names(
    kind: ArtifactKind,
    meta: &ArtifactMeta,
    schema: &FeatureSchema,
) -> Result<(), LoadError> {
    let Some(names) = &meta.feature_names else {
        return Ok(());
    };
    match schema.first_name_mismatch(names) {
        Some(mismatch) => Err(LoadError::FeatureNames { kind, mismatch }),
        None => Ok(()),
    }
}

/// Outcome of loading artifacts at start-up.
#[derive(Debug, Clone)]
pub enum ArtifactState {
    Ready(Arc<Artifacts>),
    /// Prediction is disabled; `reason` is for operators, not end users.
    Unavailable { reason: String },
}

impl ArtifactState {
    /// Load artifacts, degrading to [`ArtifactState::Unavailable`] on failure.
    pub fn load(paths: &ArtifactPaths, schema: &FeatureSchema) -> Self {
        match Artifacts::load(paths, schema) {
            Ok(artifacts) => ArtifactState::Ready(Arc::new(artifacts)),
            Err(err) => {
                warn!(error = %err, "prediction disabled");
                ArtifactState::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ArtifactState::Ready(_))
    }

    pub fn artifacts(&self) -> Option<&Arc<Artifacts>> {
        match self {
            ArtifactState::Ready(a) => Some(a),
            ArtifactState::Unavailable { .. } => None,
        }
    }
}

impl fmt::Display for ArtifactState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactState::Ready(a) => write!(
                f,
                "ready ({} scaler, {} model, {} features)",
                a.scaler().kind_name(),
                a.model().kind_name(),
                a.model().n_features()
            ),
            ArtifactState::Unavailable { reason } => write!(f, "unavailable: {reason}"),
        }
    }
}
