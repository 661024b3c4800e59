//! Artifact metadata and the fitted objects it describes.

use super::{RegressionModel, Scaler};

/// Shared metadata for fitted artifacts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactMeta {
    /// Number of input features.
    pub n_features: usize,
    /// Feature names in fit order (optional).
    pub feature_names: Option<Vec<String>>,
    /// Tool that produced the artifact (optional).
    pub producer: Option<String>,
}

impl ArtifactMeta {
    /// Metadata for an artifact with `n_features` inputs.
    pub fn new(n_features: usize) -> Self {
        Self {
            n_features,
            ..Default::default()
        }
    }

    /// Set feature names.
    pub fn with_feature_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the producer string.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }
}

/// A fitted scaler together with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerArtifact {
    pub meta: ArtifactMeta,
    pub scaler: Scaler,
}

impl ScalerArtifact {
    /// Wrap a scaler with metadata derived from its width.
    pub fn new(scaler: Scaler) -> Self {
        Self {
            meta: ArtifactMeta::new(scaler.n_features()),
            scaler,
        }
    }

    pub fn with_meta(mut self, meta: ArtifactMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// A fitted regression model together with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub meta: ArtifactMeta,
    pub model: RegressionModel,
}

impl ModelArtifact {
    /// Wrap a model with metadata derived from its width.
    pub fn new(model: impl Into<RegressionModel>) -> Self {
        let model = model.into();
        Self {
            meta: ArtifactMeta::new(model.n_features()),
            model,
        }
    }

    pub fn with_meta(mut self, meta: ArtifactMeta) -> Self {
        self.meta = meta;
        self
    }
}
