//! Canonical forest representation (collection of regression trees).

use std::fmt;

use ndarray::ArrayView1;

use super::tree::{Tree, TreeValidationError};

/// How per-tree outputs are combined into one prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    /// Boosted ensemble: `base_score + Σ tree(x)`.
    Sum { base_score: f64 },
    /// Bagged ensemble (random forest): `mean(tree(x))`.
    Mean,
}

impl Aggregation {
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::Sum { .. } => "sum",
            Aggregation::Mean => "mean",
        }
    }
}

/// Structural validation errors for [`Forest`].
#[derive(Debug, Clone, PartialEq)]
pub enum ForestValidationError {
    NoFeatures,
    NoTrees,
    NonFiniteBaseScore(f64),
    InvalidTree {
        tree_idx: usize,
        error: TreeValidationError,
    },
}

impl fmt::Display for ForestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFeatures => f.write_str("forest declares zero input features"),
            Self::NoTrees => f.write_str("mean-aggregated forest has no trees"),
            Self::NonFiniteBaseScore(v) => write!(f, "base score {v} is not finite"),
            Self::InvalidTree { tree_idx, error } => write!(f, "tree {tree_idx}: {error}"),
        }
    }
}

impl std::error::Error for ForestValidationError {}

/// Ensemble of regression trees over a fixed input width.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    n_features: usize,
    aggregation: Aggregation,
    trees: Vec<Tree>,
}

impl Forest {
    /// Create an empty forest.
    pub fn new(n_features: usize, aggregation: Aggregation) -> Self {
        Self {
            n_features,
            aggregation,
            trees: Vec::new(),
        }
    }

    /// Add a tree to the forest.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Builder-style [`push_tree`](Self::push_tree).
    pub fn with_tree(mut self, tree: Tree) -> Self {
        self.push_tree(tree);
        self
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Iterate over trees.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Validate structural invariants for the forest and each of its trees.
    ///
    /// Every split must reference a feature below `n_features`.
    pub fn validate(&self) -> Result<(), ForestValidationError> {
        if self.n_features == 0 {
            return Err(ForestValidationError::NoFeatures);
        }
        match self.aggregation {
            Aggregation::Mean if self.trees.is_empty() => {
                return Err(ForestValidationError::NoTrees);
            }
            Aggregation::Sum { base_score } if !base_score.is_finite() => {
                return Err(ForestValidationError::NonFiniteBaseScore(base_score));
            }
            _ => {}
        }

        for (tree_idx, tree) in self.trees.iter().enumerate() {
            let invalid = |error| ForestValidationError::InvalidTree { tree_idx, error };
            tree.validate().map_err(invalid)?;
            for node in 0..tree.n_nodes() as u32 {
                if tree.is_leaf(node) {
                    continue;
                }
                let feature = tree.split_index(node);
                if feature as usize >= self.n_features {
                    return Err(invalid(TreeValidationError::SplitFeatureOutOfRange {
                        node,
                        feature,
                        n_features: self.n_features,
                    }));
                }
            }
        }

        Ok(())
    }

    /// Predict for a single row of features.
    ///
    /// The caller must ensure `features.len() == self.n_features()`.
    pub fn predict_row(&self, features: ArrayView1<'_, f64>) -> f64 {
        debug_assert_eq!(features.len(), self.n_features);
        let total: f64 = self.trees.iter().map(|t| t.predict_row(features)).sum();
        match self.aggregation {
            Aggregation::Sum { base_score } => base_score + total,
            Aggregation::Mean => total / self.trees.len() as f64,
        }
    }
}
