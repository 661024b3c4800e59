//! Seams between the pipeline and the fitted artifacts.

use ndarray::{Array1, ArrayView1};

use crate::repr::{Forest, LinearModel, RegressionModel, Scaler};

/// A fitted per-row feature transform.
///
/// Implementations may assume `x.len() == self.n_features_in()`; the
/// pipeline checks this before calling [`transform`](Self::transform).
pub trait FeatureTransform {
    /// Input width the transform was fitted on.
    fn n_features_in(&self) -> usize;

    /// Transform one row.
    fn transform(&self, x: ArrayView1<'_, f64>) -> Array1<f64>;
}

/// A fitted single-output regressor.
///
/// Implementations may assume `x.len() == self.n_features_in()`.
pub trait Regressor {
    /// Input width the model was fitted on.
    fn n_features_in(&self) -> usize;

    /// Predict one row.
    fn predict_row(&self, x: ArrayView1<'_, f64>) -> f64;
}

impl FeatureTransform for Scaler {
    fn n_features_in(&self) -> usize {
        self.n_features()
    }

    fn transform(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        self.transform_row(x)
    }
}

impl Regressor for LinearModel {
    fn n_features_in(&self) -> usize {
        self.n_features()
    }

    fn predict_row(&self, x: ArrayView1<'_, f64>) -> f64 {
        LinearModel::predict_row(self, x)
    }
}

impl Regressor for Forest {
    fn n_features_in(&self) -> usize {
        self.n_features()
    }

    fn predict_row(&self, x: ArrayView1<'_, f64>) -> f64 {
        Forest::predict_row(self, x)
    }
}

impl Regressor for RegressionModel {
    fn n_features_in(&self) -> usize {
        self.n_features()
    }

    fn predict_row(&self, x: ArrayView1<'_, f64>) -> f64 {
        RegressionModel::predict_row(self, x)
    }
}
