//! Canonical in-memory representations of the fitted artifacts.
//!
//! These types hold parameters only. Loading lives in [`crate::persist`] and
//! the prediction path in [`crate::inference`].

mod artifact;
mod forest;
mod linear;
mod model;
mod scaler;
mod tree;

pub use artifact::{ArtifactMeta, ModelArtifact, ScalerArtifact};
pub use forest::{Aggregation, Forest, ForestValidationError};
pub use linear::LinearModel;
pub use model::{ModelValidationError, RegressionModel};
pub use scaler::{MinMaxScaler, Scaler, ScalerValidationError, StandardScaler};
pub use tree::{NodeId, Tree, TreeValidationError};
