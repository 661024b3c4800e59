//! Fitted feature scalers.
//!
//! Parameters follow scikit-learn's fitted attributes so exported scalers can
//! be reproduced exactly:
//!
//! - [`StandardScaler`]: `z = (x - mean_) / scale_`
//! - [`MinMaxScaler`]: `z = x * scale_ + min_`

use std::fmt;

use ndarray::{Array1, ArrayView1, Zip};

/// Structural validation errors for scalers.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalerValidationError {
    /// Scaler has no input features.
    Empty,
    /// A parameter array has the wrong length.
    LenMismatch {
        param: &'static str,
        expected: usize,
        len: usize,
    },
    /// A parameter value is NaN or infinite.
    NonFinite { param: &'static str, index: usize },
}

impl fmt::Display for ScalerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("scaler has no input features"),
            Self::LenMismatch {
                param,
                expected,
                len,
            } => write!(f, "`{param}` has {len} entries, expected {expected}"),
            Self::NonFinite { param, index } => {
                write!(f, "`{param}[{index}]` is not a finite number")
            }
        }
    }
}

impl std::error::Error for ScalerValidationError {}

fn check_param(
    param: &'static str,
    values: &Array1<f64>,
    expected: usize,
) -> Result<(), ScalerValidationError> {
    if values.len() != expected {
        return Err(ScalerValidationError::LenMismatch {
            param,
            expected,
            len: values.len(),
        });
    }
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ScalerValidationError::NonFinite { param, index }),
        None => Ok(()),
    }
}

// =============================================================================
// StandardScaler
// =============================================================================

/// Standardizes features by removing the mean and dividing by the scale.
///
/// Either step can be absent (`with_mean=False` / `with_std=False` at fit
/// time). A zero scale entry leaves that feature unscaled.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    n_features: usize,
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    /// Create a fitted standard scaler.
    pub fn new(
        n_features: usize,
        mean: Option<Array1<f64>>,
        scale: Option<Array1<f64>>,
    ) -> Result<Self, ScalerValidationError> {
        if n_features == 0 {
            return Err(ScalerValidationError::Empty);
        }
        if let Some(mean) = &mean {
            check_param("mean", mean, n_features)?;
        }
        if let Some(scale) = &scale {
            check_param("scale", scale, n_features)?;
        }
        Ok(Self {
            n_features,
            mean,
            scale,
        })
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Per-feature means, if centering is enabled.
    pub fn mean(&self) -> Option<ArrayView1<'_, f64>> {
        self.mean.as_ref().map(|m| m.view())
    }

    /// Per-feature scales, if scaling is enabled.
    pub fn scale(&self) -> Option<ArrayView1<'_, f64>> {
        self.scale.as_ref().map(|s| s.view())
    }

    fn apply(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        let mut out = x.to_owned();
        if let Some(mean) = &self.mean {
            out -= mean;
        }
        if let Some(scale) = &self.scale {
            Zip::from(&mut out).and(scale).for_each(|v, &s| {
                if s != 0.0 {
                    *v /= s;
                }
            });
        }
        out
    }
}

// =============================================================================
// MinMaxScaler
// =============================================================================

/// Scales features linearly into a target range.
///
/// `min` and `scale` are the already-combined affine parameters
/// (`scale = range / (data_max - data_min)`, `min = range_min - data_min * scale`).
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Array1<f64>,
    scale: Array1<f64>,
}

impl MinMaxScaler {
    /// Create a fitted min-max scaler.
    pub fn new(min: Array1<f64>, scale: Array1<f64>) -> Result<Self, ScalerValidationError> {
        let n_features = min.len();
        if n_features == 0 {
            return Err(ScalerValidationError::Empty);
        }
        check_param("min", &min, n_features)?;
        check_param("scale", &scale, n_features)?;
        Ok(Self { min, scale })
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.min.len()
    }

    /// Additive offsets.
    pub fn min(&self) -> ArrayView1<'_, f64> {
        self.min.view()
    }

    /// Multiplicative factors.
    pub fn scale(&self) -> ArrayView1<'_, f64> {
        self.scale.view()
    }

    fn apply(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        &x * &self.scale + &self.min
    }
}

// =============================================================================
// Scaler
// =============================================================================

/// A fitted scaling transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Scaler {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
    /// Passthrough for models fitted on raw features.
    Identity { n_features: usize },
}

impl Scaler {
    /// Number of input features the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard(s) => s.n_features(),
            Scaler::MinMax(s) => s.n_features(),
            Scaler::Identity { n_features } => *n_features,
        }
    }

    /// Short name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scaler::Standard(_) => "standard",
            Scaler::MinMax(_) => "min_max",
            Scaler::Identity { .. } => "identity",
        }
    }

    /// Check the invariants scaling relies on.
    ///
    /// The fitted variants are checked on construction, so only an empty
    /// passthrough can fail here.
    pub fn validate(&self) -> Result<(), ScalerValidationError> {
        if self.n_features() == 0 {
            return Err(ScalerValidationError::Empty);
        }
        Ok(())
    }

    /// Scale one row.
    ///
    /// The caller must ensure `x.len() == self.n_features()`; the inference
    /// pipeline checks this before calling.
    pub fn transform_row(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        debug_assert_eq!(x.len(), self.n_features());
        match self {
            Scaler::Standard(s) => s.apply(x),
            Scaler::MinMax(s) => s.apply(x),
            Scaler::Identity { .. } => x.to_owned(),
        }
    }
}
