//! Positional feature vector.

use ndarray::{Array1, ArrayView1};

use crate::schema::Field;

/// Ordered numeric encoding of one student's inputs.
///
/// Built by [`FeatureAssembler`](super::FeatureAssembler) in schema order.
/// Immutable once built. [`from_values`](Self::from_values) accepts any
/// length so that a malformed vector can still reach the pipeline and be
/// rejected there.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Array1<f64>,
}

impl FeatureVector {
    /// Wrap raw positional values without checking length or order.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            values: Array1::from_vec(values),
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the vector has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a schema field, if the vector is long enough to hold it.
    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(field.index()).copied()
    }

    /// Read-only view for the transform boundary.
    #[inline]
    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Values as a contiguous slice.
    pub fn as_slice(&self) -> &[f64] {
        self.values
            .as_slice()
            .expect("feature vector should be contiguous")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_access() {
        let v = FeatureVector::from_values((0..12).map(f64::from).collect());
        assert_eq!(v.len(), 12);
        assert_eq!(v.get(Field::Age), Some(0.0));
        assert_eq!(v.get(Field::Volunteering), Some(11.0));
    }

    #[test]
    fn short_vector_has_no_tail_fields() {
        let v = FeatureVector::from_values(vec![17.0; 8]);
        assert_eq!(v.get(Field::Sports), None);
        assert_eq!(v.as_slice().len(), 8);
    }
}
