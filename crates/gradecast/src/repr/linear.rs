//! Linear regression model data structure.

use ndarray::{s, Array1, ArrayView1};

/// Linear regression model (coefficients + intercept).
///
/// Stores the coefficients and the intercept in a single `Array1<f64>` of
/// length `n_features + 1`:
///
/// ```text
/// weights[feature]    → coefficient
/// weights[n_features] → intercept (last entry)
/// ```
///
/// Prediction is `y = x · weights[..n] + weights[n]`.
///
/// # Example
///
/// ```
/// use gradecast::repr::LinearModel;
/// use ndarray::array;
///
/// let model = LinearModel::new(array![0.5, 0.3], 0.1);
///
/// assert_eq!(model.n_features(), 2);
/// assert_eq!(model.weight(1), 0.3);
/// assert_eq!(model.intercept(), 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Array1<f64>,
}

impl LinearModel {
    /// Create a model from coefficients and an intercept.
    pub fn new(coefficients: Array1<f64>, intercept: f64) -> Self {
        let mut weights = coefficients.to_vec();
        weights.push(intercept);
        Self {
            weights: Array1::from_vec(weights),
        }
    }

    /// Create a model from the combined layout (intercept last).
    ///
    /// # Panics
    ///
    /// Panics if `weights` is empty (the intercept entry is required).
    pub fn from_array(weights: Array1<f64>) -> Self {
        assert!(!weights.is_empty(), "weights must contain the intercept");
        Self { weights }
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.len() - 1
    }

    /// Coefficient for a feature.
    #[inline]
    pub fn weight(&self, feature: usize) -> f64 {
        self.weights[feature]
    }

    /// Intercept term.
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.weights[self.n_features()]
    }

    /// Coefficients (excluding the intercept).
    #[inline]
    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.weights.slice(s![..self.n_features()])
    }

    /// Predict for a single row.
    ///
    /// The caller must ensure `features.len() == self.n_features()`.
    #[inline]
    pub fn predict_row(&self, features: ArrayView1<'_, f64>) -> f64 {
        debug_assert_eq!(
            features.len(),
            self.n_features(),
            "not enough features: got {}, need {}",
            features.len(),
            self.n_features()
        );
        features.dot(&self.coefficients()) + self.intercept()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn new_appends_intercept() {
        let model = LinearModel::new(array![0.5, 0.3], 0.1);
        assert_eq!(model.n_features(), 2);
        assert_eq!(model.weight(0), 0.5);
        assert_eq!(model.coefficients(), array![0.5, 0.3]);
        assert_eq!(model.intercept(), 0.1);
    }

    #[test]
    fn from_array_layout() {
        let model = LinearModel::from_array(array![0.5, 0.3, 0.1]);
        assert_eq!(model, LinearModel::new(array![0.5, 0.3], 0.1));
    }

    #[test]
    fn predict_row_regression() {
        // y = 0.5 * x0 + 0.3 * x1 + 0.1
        let model = LinearModel::new(array![0.5, 0.3], 0.1);
        let y = model.predict_row(array![2.0, 3.0].view());
        assert_abs_diff_eq!(y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn intercept_only() {
        let model = LinearModel::from_array(array![2.5]);
        assert_eq!(model.n_features(), 0);
        assert_eq!(model.predict_row(Array1::<f64>::zeros(0).view()), 2.5);
    }

    #[test]
    #[should_panic(expected = "weights must contain the intercept")]
    fn empty_weights_panics() {
        LinearModel::from_array(Array1::zeros(0));
    }
}
