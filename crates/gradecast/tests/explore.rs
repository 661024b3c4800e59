//! Exploration over the bundled sample dataset.

use approx::assert_relative_eq;

use gradecast::explore::{ExploreError, StudentDataset};
use gradecast::testing::test_cases_dir;

fn dataset() -> StudentDataset {
    StudentDataset::load_csv(test_cases_dir().join("data/students.csv")).expect("load dataset")
}

#[test]
fn loads_all_rows() {
    let ds = dataset();
    assert_eq!(ds.len(), 40);
    assert_eq!(ds.gpa_vs_absences().len(), 40);
}

#[test]
fn summary_ranges() {
    let summary = dataset().summary();
    assert_eq!(summary.absences.count, 40);
    assert_relative_eq!(summary.absences.mean, 15.3, epsilon = 1e-9);
    assert_eq!(summary.absences.min, 1.0);
    assert_eq!(summary.absences.max, 28.0);
    assert!(summary.gpa.min >= 0.0 && summary.gpa.max <= 4.0);
    assert!(summary.study_time_weekly.std > 0.0);
}

#[test]
fn absences_lower_gpa() {
    let r = dataset().absences_gpa_correlation().expect("defined");
    assert_relative_eq!(r, -0.9029366887901946, epsilon = 1e-9);
}

#[test]
fn histogram_spans_observed_range() {
    let ds = dataset();
    let summary = ds.summary();
    let h = ds.study_time_histogram(8).unwrap();

    assert_eq!(h.counts().len(), 8);
    assert_eq!(h.counts().iter().sum::<usize>(), 40);
    assert_eq!(h.edges().first().copied(), Some(summary.study_time_weekly.min));
    assert_eq!(h.edges().last().copied(), Some(summary.study_time_weekly.max));

    let auto = ds.study_time_histogram_auto();
    assert_eq!(auto.counts().len(), 7);
}

#[test]
fn zero_bins_is_an_error() {
    assert!(matches!(
        dataset().study_time_histogram(0),
        Err(ExploreError::InvalidBins(0))
    ));
}
