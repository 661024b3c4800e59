//! Schema types for artifact serialization.
//!
//! These types define the on-disk JSON layout and are kept separate from the
//! runtime types in [`crate::repr`]. Deserialization only checks shape;
//! structural invariants are enforced during conversion.

use serde::{Deserialize, Serialize};

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// Which payload an artifact document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Scaler,
    Model,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::Model => "model",
        })
    }
}

/// Leading fields shared by every artifact document.
///
/// Parsed first so version and kind can be reported before the payload is
/// interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHeader {
    pub format_version: u32,
    pub kind: ArtifactKind,
}

/// Artifact metadata schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetaSchema {
    /// Number of input features the artifact was fitted on.
    pub n_features: usize,
    /// Feature names in fit order (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// Free-form producer string, e.g. `"sklearn 1.4.2"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
}

/// Scaler payload schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScalerSchema {
    /// `(x - mean) / scale`; either array may be absent.
    Standard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mean: Option<Vec<f64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<Vec<f64>>,
    },
    /// `x * scale + min`.
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    /// Passthrough.
    Identity,
}

/// Tree schema (SoA layout, one entry per node).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    pub split_indices: Vec<u32>,
    pub thresholds: Vec<f64>,
    /// Left child per node (`0` on both sides marks a leaf).
    pub children_left: Vec<u32>,
    pub children_right: Vec<u32>,
    pub leaf_values: Vec<f64>,
}

/// Tree aggregation schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregationSchema {
    Sum { base_score: f64 },
    Mean,
}

/// Model payload schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSchema {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Forest {
        aggregation: AggregationSchema,
        trees: Vec<TreeSchema>,
    },
}

/// Full scaler artifact document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifactSchema {
    pub format_version: u32,
    pub kind: ArtifactKind,
    pub meta: ArtifactMetaSchema,
    pub scaler: ScalerSchema,
}

/// Full model artifact document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifactSchema {
    pub format_version: u32,
    pub kind: ArtifactKind,
    pub meta: ArtifactMetaSchema,
    pub model: ModelSchema,
}
