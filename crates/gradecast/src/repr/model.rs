//! Fitted regression model.

use std::fmt;

use ndarray::ArrayView1;

use super::{Forest, ForestValidationError, LinearModel};

/// Structural validation errors for [`RegressionModel`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Linear model declares zero input features.
    NoFeatures,
    /// A coefficient (or the intercept, at index `n_features`) is NaN or infinite.
    NonFiniteWeight { index: usize },
    Forest(ForestValidationError),
}

impl fmt::Display for ModelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFeatures => f.write_str("linear model declares zero input features"),
            Self::NonFiniteWeight { index } => write!(f, "weight {index} is not finite"),
            Self::Forest(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ModelValidationError {}

/// A fitted GPA regressor.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionModel {
    Linear(LinearModel),
    Forest(Forest),
}

impl RegressionModel {
    /// Number of input features the model was fitted on.
    pub fn n_features(&self) -> usize {
        match self {
            RegressionModel::Linear(m) => m.n_features(),
            RegressionModel::Forest(f) => f.n_features(),
        }
    }

    /// Short name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RegressionModel::Linear(_) => "linear",
            RegressionModel::Forest(_) => "forest",
        }
    }

    /// Check the invariants prediction relies on.
    ///
    /// Models read through [`crate::persist`] already satisfy them; models
    /// assembled in code are checked here before they serve requests.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        match self {
            RegressionModel::Linear(m) => {
                if m.n_features() == 0 {
                    return Err(ModelValidationError::NoFeatures);
                }
                let coefficients = m.coefficients();
                let intercept = m.intercept();
                let mut weights = coefficients.iter().chain(std::iter::once(&intercept));
                match weights.position(|w| !w.is_finite()) {
                    Some(index) => Err(ModelValidationError::NonFiniteWeight { index }),
                    None => Ok(()),
                }
            }
            RegressionModel::Forest(f) => f.validate().map_err(ModelValidationError::Forest),
        }
    }

    /// Predict for a single (already scaled) row.
    pub fn predict_row(&self, features: ArrayView1<'_, f64>) -> f64 {
        match self {
            RegressionModel::Linear(m) => m.predict_row(features),
            RegressionModel::Forest(f) => f.predict_row(features),
        }
    }
}

impl From<LinearModel> for RegressionModel {
    fn from(model: LinearModel) -> Self {
        RegressionModel::Linear(model)
    }
}

impl From<Forest> for RegressionModel {
    fn from(forest: Forest) -> Self {
        RegressionModel::Forest(forest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{Aggregation, Tree};
    use ndarray::array;

    #[test]
    fn linear_validation() {
        let model = RegressionModel::from(LinearModel::new(array![0.5, 0.3], 0.1));
        assert_eq!(model.validate(), Ok(()));

        let model = RegressionModel::from(LinearModel::new(array![0.5, f64::NAN], 0.1));
        assert_eq!(
            model.validate(),
            Err(ModelValidationError::NonFiniteWeight { index: 1 })
        );

        let model = RegressionModel::from(LinearModel::new(array![0.5], f64::INFINITY));
        assert_eq!(
            model.validate(),
            Err(ModelValidationError::NonFiniteWeight { index: 1 })
        );

        let model = RegressionModel::from(LinearModel::from_array(array![2.5]));
        assert_eq!(model.validate(), Err(ModelValidationError::NoFeatures));
    }

    #[test]
    fn forest_split_past_width_is_rejected() {
        let stump = Tree::new(
            vec![20, 0, 0],
            vec![0.0, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![0.0, 1.0, 2.0],
        )
        .unwrap();
        let model = RegressionModel::from(Forest::new(12, Aggregation::Mean).with_tree(stump));
        let err = model.validate().unwrap_err();
        assert!(matches!(err, ModelValidationError::Forest(_)), "{err:?}");
        assert!(err.to_string().contains("feature 20"), "{err}");
    }
}
