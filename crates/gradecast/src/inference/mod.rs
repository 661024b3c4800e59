//! Prediction path: scaling followed by regression.
//!
//! - [`FeatureTransform`] / [`Regressor`]: the seams the fitted artifacts plug into
//! - [`InferencePipeline`]: width-checked scale → predict
//! - [`Prediction`]: the GPA plus its display ratio

mod pipeline;
mod prediction;
mod traits;

pub use pipeline::InferencePipeline;
pub use prediction::{display_ratio, Prediction, GPA_SCALE};
pub use traits::{FeatureTransform, Regressor};
