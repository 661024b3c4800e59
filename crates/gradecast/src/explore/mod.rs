//! Exploratory statistics over the student performance dataset.
//!
//! Independent of the fitted artifacts: exploration works even when the
//! prediction path is unavailable.

mod stats;

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub use stats::{pearson, sturges_bins, ColumnSummary, Histogram};

/// Errors while loading or summarising the dataset.
#[derive(Debug, Error)]
pub enum ExploreError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset has no rows")]
    Empty,

    #[error("histogram needs at least one bin, got {0}")]
    InvalidBins(usize),

    #[error("column {0} has no finite values")]
    NoFiniteValues(&'static str),
}

/// The dataset columns exploration uses; other columns are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Observation {
    #[serde(rename = "Absences")]
    pub absences: f64,
    #[serde(rename = "StudyTimeWeekly")]
    pub study_time_weekly: f64,
    #[serde(rename = "GPA")]
    pub gpa: f64,
}

/// Per-column summary of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub absences: ColumnSummary,
    pub study_time_weekly: ColumnSummary,
    pub gpa: ColumnSummary,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:>6} {:>8} {:>8} {:>8} {:>8}",
            "column", "count", "mean", "std", "min", "max"
        )?;
        for (name, s) in [
            ("Absences", &self.absences),
            ("StudyTimeWeekly", &self.study_time_weekly),
            ("GPA", &self.gpa),
        ] {
            writeln!(
                f,
                "{name:<16} {:>6} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
                s.count, s.mean, s.std, s.min, s.max
            )?;
        }
        Ok(())
    }
}

/// Loaded student performance observations.
#[derive(Debug, Clone)]
pub struct StudentDataset {
    rows: Vec<Observation>,
}

impl StudentDataset {
    /// Build from already loaded rows.
    pub fn from_rows(rows: Vec<Observation>) -> Result<Self, ExploreError> {
        if rows.is_empty() {
            return Err(ExploreError::Empty);
        }
        Ok(Self { rows })
    }

    /// Read a CSV file with a header row.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, ExploreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ExploreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        info!(path = %path.display(), rows = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    /// Read CSV data with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExploreError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let rows = reader
            .deserialize::<Observation>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; construction rejects empty data.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    fn column(&self, f: impl Fn(&Observation) -> f64) -> Vec<f64> {
        self.rows.iter().map(f).collect()
    }

    /// `(absences, gpa)` points for a scatter plot.
    pub fn gpa_vs_absences(&self) -> Vec<(f64, f64)> {
        self.rows.iter().map(|r| (r.absences, r.gpa)).collect()
    }

    /// Pearson correlation between absences and GPA.
    ///
    /// `None` with fewer than two rows or a constant column.
    pub fn absences_gpa_correlation(&self) -> Option<f64> {
        pearson(&self.column(|r| r.absences), &self.column(|r| r.gpa))
    }

    /// Equal-width histogram of weekly study time over the observed range.
    pub fn study_time_histogram(&self, bins: usize) -> Result<Histogram, ExploreError> {
        if bins == 0 {
            return Err(ExploreError::InvalidBins(bins));
        }
        Histogram::equal_width(&self.column(|r| r.study_time_weekly), bins)
            .ok_or(ExploreError::NoFiniteValues("StudyTimeWeekly"))
    }

    /// Histogram with the bin count chosen by Sturges' rule.
    pub fn study_time_histogram_auto(&self) -> Histogram {
        let bins = sturges_bins(self.len());
        Histogram::equal_width(&self.column(|r| r.study_time_weekly), bins)
            .unwrap_or_else(Histogram::empty)
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            absences: ColumnSummary::of(&self.column(|r| r.absences)),
            study_time_weekly: ColumnSummary::of(&self.column(|r| r.study_time_weekly)),
            gpa: ColumnSummary::of(&self.column(|r| r.gpa)),
        }
    }
}
