//! Artifact persistence.
//!
//! Fitted scalers and models are stored as versioned JSON documents:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "kind": "model",
//!   "meta": { "n_features": 12, "feature_names": ["Age", "..."] },
//!   "model": { "type": "linear", "coefficients": [...], "intercept": 2.9 }
//! }
//! ```
//!
//! [`schema`] holds the serialized layout, [`convert`] maps it onto the
//! runtime types in [`crate::repr`] and validates them on the way in.

pub mod convert;
mod error;
mod json;
pub mod schema;

pub use error::{ReadError, WriteError};
pub use json::{
    load_model, load_scaler, read_model_json, read_scaler_json, save_model, save_scaler,
    write_model_json, write_scaler_json, JsonWriteOptions,
};
pub use schema::{ArtifactKind, FORMAT_VERSION};
