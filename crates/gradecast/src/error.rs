//! Error types for the prediction path.
//!
//! Every failure a prediction request can hit maps to one [`PredictError`]
//! variant, and each variant belongs to exactly one pipeline [`Stage`].

use std::fmt;

use thiserror::Error;

/// Result type alias for prediction operations.
pub type PredictResult<T> = Result<T, PredictError>;

/// Pipeline stage at which a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Artifact loading at start-up.
    Load,
    /// Turning named inputs into a feature vector.
    Assemble,
    /// Applying the fitted scaling transform.
    Scale,
    /// Running the regression model.
    Predict,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Load => "model loading",
            Stage::Assemble => "input validation",
            Stage::Scale => "feature scaling",
            Stage::Predict => "model prediction",
        })
    }
}

/// Reason a single input field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Required field was not supplied.
    Missing,
    /// Supplied value has the wrong type.
    WrongType {
        expected: &'static str,
        found: String,
    },
    /// Value lies outside the declared range.
    OutOfRange { value: f64, min: f64, max: f64 },
    /// Field name is not part of the schema.
    Unknown,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing => f.write_str("required field is missing"),
            Violation::WrongType { expected, found } => {
                write!(f, "expected {expected}, got {found}")
            }
            Violation::OutOfRange { value, min, max } => {
                write!(f, "value {value} is outside the allowed range {min}..={max}")
            }
            Violation::Unknown => f.write_str("not a recognised input field"),
        }
    }
}

/// Errors produced by a prediction request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// Scaler or model could not be loaded; the prediction path is disabled.
    #[error("prediction artifacts unavailable: {reason}")]
    ArtifactUnavailable { reason: String },

    /// A required field is missing, mistyped, or out of range.
    #[error("invalid field `{field}`: {violation}")]
    SchemaViolation { field: String, violation: Violation },

    /// Feature vector length disagrees with the fitted scaler.
    #[error("scaler expects {expected} features, got {actual}")]
    ScalerMismatch { expected: usize, actual: usize },

    /// Scaled vector length disagrees with the fitted model.
    #[error("model expects {expected} features, got {actual}")]
    ModelMismatch { expected: usize, actual: usize },
}

impl PredictError {
    /// Create a schema violation for a named field.
    pub fn violation(field: impl Into<String>, violation: Violation) -> Self {
        Self::SchemaViolation {
            field: field.into(),
            violation,
        }
    }

    /// Create an artifact-unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::ArtifactUnavailable {
            reason: reason.into(),
        }
    }

    /// Stage at which the request failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::ArtifactUnavailable { .. } => Stage::Load,
            Self::SchemaViolation { .. } => Stage::Assemble,
            Self::ScalerMismatch { .. } => Stage::Scale,
            Self::ModelMismatch { .. } => Stage::Predict,
        }
    }

    /// Returns true if the caller can fix the request and try again.
    ///
    /// Everything else is a deployment problem between the artifacts and
    /// the feature schema.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::SchemaViolation { .. })
    }

    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::ArtifactUnavailable { .. } => format!(
                "Prediction is unavailable ({}): the model files could not be loaded.",
                self.stage()
            ),
            Self::SchemaViolation { field, violation } => {
                format!("Please check `{field}` ({}): {violation}.", self.stage())
            }
            Self::ScalerMismatch { .. } | Self::ModelMismatch { .. } => format!(
                "Prediction failed during {}: the installed model does not match the \
                 12 input features.",
                self.stage()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages() {
        assert_eq!(PredictError::unavailable("x").stage(), Stage::Load);
        assert_eq!(
            PredictError::violation("Age", Violation::Missing).stage(),
            Stage::Assemble
        );
        assert_eq!(
            PredictError::ScalerMismatch {
                expected: 12,
                actual: 11
            }
            .stage(),
            Stage::Scale
        );
        assert_eq!(
            PredictError::ModelMismatch {
                expected: 12,
                actual: 13
            }
            .stage(),
            Stage::Predict
        );
    }

    #[test]
    fn display_names_field() {
        let err = PredictError::violation(
            "Absences",
            Violation::OutOfRange {
                value: -1.0,
                min: 0.0,
                max: 30.0,
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("Absences"), "{msg}");
        assert!(msg.contains("-1"), "{msg}");
    }

    #[test]
    fn user_message_names_stage_without_internals() {
        let err = PredictError::unavailable("No such file or directory (os error 2)");
        let msg = err.user_message();
        assert!(msg.contains("model loading"));
        assert!(!msg.contains("os error"));

        let err = PredictError::ModelMismatch {
            expected: 12,
            actual: 8,
        };
        assert!(err.user_message().contains("model prediction"));
        assert!(!err.is_client_error());
    }
}
