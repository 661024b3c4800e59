//! Property-based tests for the prediction path.

use proptest::prelude::*;
use rstest::rstest;

use gradecast::inference::{display_ratio, InferencePipeline, Prediction};
use gradecast::repr::{LinearModel, Scaler};
use gradecast::testing::{reference_linear_model, reference_scaler};
use gradecast::{FeatureAssembler, FeatureInput, Field, RawValue, ValidationPolicy};
use ndarray::Array1;

// =============================================================================
// Display ratio
// =============================================================================

#[rstest]
#[case(5.2, 1.0)]
#[case(-0.3, 0.0)]
#[case(2.0, 0.5)]
#[case(0.0, 0.0)]
#[case(4.0, 1.0)]
#[case(3.0, 0.75)]
fn display_ratio_cases(#[case] gpa: f64, #[case] expected: f64) {
    assert_eq!(display_ratio(gpa), expected);
    assert_eq!(Prediction::from_gpa(gpa).gpa, gpa);
}

proptest! {
    #[test]
    fn display_ratio_is_bounded(gpa in prop::num::f64::ANY) {
        let r = display_ratio(gpa);
        prop_assert!((0.0..=1.0).contains(&r), "gpa {} -> {}", gpa, r);
    }

    #[test]
    fn display_ratio_is_monotone(a in -10.0f64..10.0, b in -10.0f64..10.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(display_ratio(lo) <= display_ratio(hi));
    }
}

// =============================================================================
// Assembler identity
// =============================================================================

/// Strategy for one in-range value per schema field.
fn arb_student() -> impl Strategy<Value = Vec<f64>> {
    Field::ALL
        .iter()
        .map(|field| {
            let (min, max) = field.kind().bounds();
            if field.kind().is_integral() {
                (min as i64..=max as i64).prop_map(|v| v as f64).boxed()
            } else {
                (min..=max).boxed()
            }
        })
        .collect::<Vec<_>>()
}

fn to_input(values: &[f64]) -> FeatureInput {
    Field::ALL
        .iter()
        .zip(values)
        .map(|(field, &v)| {
            let raw: RawValue = if field.kind().is_integral() {
                (v as i64).into()
            } else {
                v.into()
            };
            (field.name().to_string(), raw)
        })
        .collect()
}

proptest! {
    #[test]
    fn assembler_preserves_values_in_schema_order(values in arb_student()) {
        let input = to_input(&values);
        for policy in [ValidationPolicy::Strict, ValidationPolicy::Lenient] {
            let vector = FeatureAssembler::new(policy).assemble(&input).unwrap();
            prop_assert_eq!(vector.len(), 12);
            prop_assert_eq!(vector.as_slice(), values.as_slice());
        }
    }

    #[test]
    fn in_range_inputs_always_predict(values in arb_student()) {
        let scaler = reference_scaler();
        let model = reference_linear_model();
        let vector = FeatureAssembler::default().assemble(&to_input(&values)).unwrap();
        let p = InferencePipeline::new(&scaler.scaler, &model.model).run(&vector).unwrap();
        prop_assert!(p.gpa.is_finite());
        prop_assert!((0.0..=1.0).contains(&p.display_ratio));
    }

    #[test]
    fn only_matching_width_is_accepted(n in 0usize..30) {
        let scaler = Scaler::Identity { n_features: 12 };
        let model = LinearModel::new(Array1::zeros(12), 2.0);
        let pipeline = InferencePipeline::new(&scaler, &model);
        let result = pipeline.predict_row(Array1::zeros(n).view());
        prop_assert_eq!(result.is_ok(), n == 12);
    }
}
