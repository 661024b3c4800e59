//! Scale → predict, with a width check in front of each artifact.

use ndarray::{Array1, ArrayView1};
use tracing::debug;

use crate::error::{PredictError, PredictResult};
use crate::features::FeatureVector;

use super::{FeatureTransform, Prediction, Regressor};

/// Runs a feature vector through a fitted transform and regressor.
///
/// The pipeline borrows both artifacts and holds no other state, so it is
/// cheap to build per request. Neither artifact is ever called with a row
/// whose length differs from its fitted width.
///
/// # Example
///
/// ```
/// use gradecast::inference::InferencePipeline;
/// use gradecast::repr::{LinearModel, Scaler};
/// use ndarray::array;
///
/// let scaler = Scaler::Identity { n_features: 2 };
/// let model = LinearModel::new(array![0.5, 0.25], 1.0);
/// let pipeline = InferencePipeline::new(&scaler, &model);
///
/// let prediction = pipeline.predict_row(array![2.0, 4.0].view()).unwrap();
/// assert_eq!(prediction.gpa, 3.0);
/// assert_eq!(prediction.display_ratio, 0.75);
///
/// assert!(pipeline.predict_row(array![2.0].view()).is_err());
/// ```
pub struct InferencePipeline<'a, S: ?Sized, M: ?Sized> {
    scaler: &'a S,
    model: &'a M,
}

impl<S: ?Sized, M: ?Sized> Clone for InferencePipeline<'_, S, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized, M: ?Sized> Copy for InferencePipeline<'_, S, M> {}

impl<'a, S, M> InferencePipeline<'a, S, M>
where
    S: FeatureTransform + ?Sized,
    M: Regressor + ?Sized,
{
    pub fn new(scaler: &'a S, model: &'a M) -> Self {
        Self { scaler, model }
    }

    /// Apply the scaler.
    ///
    /// Fails with [`PredictError::ScalerMismatch`] if the row width differs
    /// from the scaler's fitted width.
    pub fn scale(&self, features: ArrayView1<'_, f64>) -> PredictResult<Array1<f64>> {
        let expected = self.scaler.n_features_in();
        if features.len() != expected {
            return Err(PredictError::ScalerMismatch {
                expected,
                actual: features.len(),
            });
        }
        Ok(self.scaler.transform(features))
    }

    /// Run the model on an already scaled row.
    ///
    /// Fails with [`PredictError::ModelMismatch`] if the row width differs
    /// from the model's fitted width.
    pub fn predict_scaled(&self, scaled: ArrayView1<'_, f64>) -> PredictResult<f64> {
        let expected = self.model.n_features_in();
        if scaled.len() != expected {
            return Err(PredictError::ModelMismatch {
                expected,
                actual: scaled.len(),
            });
        }
        Ok(self.model.predict_row(scaled))
    }

    /// Scale then predict a raw row.
    pub fn predict_row(&self, features: ArrayView1<'_, f64>) -> PredictResult<Prediction> {
        let scaled = self.scale(features)?;
        let gpa = self.predict_scaled(scaled.view())?;
        debug!(gpa, "prediction complete");
        Ok(Prediction::from_gpa(gpa))
    }

    /// Scale then predict an assembled feature vector.
    pub fn run(&self, vector: &FeatureVector) -> PredictResult<Prediction> {
        self.predict_row(vector.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{LinearModel, Scaler};
    use ndarray::array;

    /// Transform that drops or pads columns.
    struct Reshape {
        n_in: usize,
        n_out: usize,
    }

    impl FeatureTransform for Reshape {
        fn n_features_in(&self) -> usize {
            self.n_in
        }

        fn transform(&self, _x: ArrayView1<'_, f64>) -> Array1<f64> {
            Array1::zeros(self.n_out)
        }
    }

    fn model(n: usize) -> LinearModel {
        LinearModel::new(Array1::from_elem(n, 0.1), 2.0)
    }

    #[test]
    fn scaler_mismatch_short_and_long() {
        let scaler = Scaler::Identity { n_features: 12 };
        let model = model(12);
        let pipeline = InferencePipeline::new(&scaler, &model);

        for n in [11, 13] {
            let err = pipeline.predict_row(Array1::zeros(n).view()).unwrap_err();
            assert_eq!(
                err,
                PredictError::ScalerMismatch {
                    expected: 12,
                    actual: n
                }
            );
        }
    }

    #[test]
    fn model_mismatch_after_scaling() {
        let scaler = Reshape { n_in: 12, n_out: 13 };
        let model = model(12);
        let err = InferencePipeline::new(&scaler, &model)
            .predict_row(Array1::zeros(12).view())
            .unwrap_err();
        assert_eq!(
            err,
            PredictError::ModelMismatch {
                expected: 12,
                actual: 13
            }
        );
    }

    #[test]
    fn scales_before_predicting() {
        let scaler = Scaler::Standard(
            crate::repr::StandardScaler::new(2, Some(array![1.0, 1.0]), Some(array![2.0, 2.0]))
                .unwrap(),
        );
        let model = LinearModel::new(array![1.0, 1.0], 0.0);
        let pipeline = InferencePipeline::new(&scaler, &model);

        let p = pipeline.predict_row(array![3.0, 5.0].view()).unwrap();
        assert_eq!(p.gpa, 3.0);
    }

    #[test]
    fn works_through_trait_objects() {
        let scaler = Scaler::Identity { n_features: 1 };
        let model = LinearModel::new(array![2.0], 0.0);
        let scaler: &dyn FeatureTransform = &scaler;
        let model: &dyn Regressor = &model;

        let p = InferencePipeline::new(scaler, model)
            .predict_row(array![1.5].view())
            .unwrap();
        assert_eq!(p.gpa, 3.0);
    }
}
