//! Feature assembly.
//!
//! Turns a mapping of named raw values ([`FeatureInput`]) into the ordered
//! [`FeatureVector`] the fitted artifacts expect. Every schema field must be
//! supplied; nothing is defaulted.

mod assembler;
mod input;
mod record;
mod vector;

pub use assembler::{FeatureAssembler, ValidationPolicy};
pub use input::{FeatureInput, RawValue};
pub use record::StudentRecord;
pub use vector::FeatureVector;
