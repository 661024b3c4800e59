//! gradecast: GPA inference for student performance data.
//!
//! Turns the twelve named student attributes into a positional feature
//! vector, applies a fitted scaling transform and a fitted regression model,
//! and reports the predicted GPA with a bounded display ratio.
//!
//! # Key Types
//!
//! - [`FeatureAssembler`] - Named inputs → ordered [`FeatureVector`]
//! - [`InferencePipeline`] - Width-checked scale → predict
//! - [`AppContext`] - Loaded artifacts plus the request path
//! - [`PredictError`] - Every way a request can fail, tagged with its [`Stage`]
//!
//! # Artifacts
//!
//! Scalers and models are JSON documents read by the [`persist`] module.
//! They are produced from fitted scikit-learn objects by the export tool in
//! `packages/gradecast-export`.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod artifacts;
pub mod config;
pub mod context;
pub mod error;
pub mod explore;
pub mod features;
pub mod inference;
pub mod persist;
pub mod repr;
pub mod schema;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use artifacts::{ArtifactPaths, ArtifactState, Artifacts, LoadError};
pub use config::{AppConfig, ConfigError};
pub use context::AppContext;
pub use error::{PredictError, PredictResult, Stage, Violation};
pub use features::{FeatureAssembler, FeatureInput, FeatureVector, RawValue, ValidationPolicy};
pub use inference::{InferencePipeline, Prediction};
pub use schema::{FeatureSchema, Field, N_FEATURES};
