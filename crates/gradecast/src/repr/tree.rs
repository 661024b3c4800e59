//! Canonical regression tree representation (SoA).

use std::fmt;

use ndarray::ArrayView1;

/// Node index within a tree.
pub type NodeId = u32;

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    EmptyTree,
    /// Per-node arrays disagree in length.
    ArrayLenMismatch {
        array: &'static str,
        len: usize,
        n_nodes: usize,
    },
    /// A child pointer references an out-of-bounds node.
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },
    /// Exactly one child pointer is zero.
    HalfLeaf { node: NodeId },
    /// A node references itself as a child.
    SelfLoop { node: NodeId },
    /// A node was reached by more than one path.
    DuplicateVisit { node: NodeId },
    /// A node is reachable from itself.
    CycleDetected { node: NodeId },
    /// A node is not reachable from the root.
    UnreachableNode { node: NodeId },
    /// A split references a feature outside the input width.
    SplitFeatureOutOfRange {
        node: NodeId,
        feature: u32,
        n_features: usize,
    },
    /// A threshold or leaf value is NaN or infinite.
    NonFiniteValue { node: NodeId },
}

impl fmt::Display for TreeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTree => f.write_str("tree has no nodes"),
            Self::ArrayLenMismatch {
                array,
                len,
                n_nodes,
            } => write!(f, "`{array}` has {len} entries but the tree has {n_nodes} nodes"),
            Self::ChildOutOfBounds {
                node,
                side,
                child,
                n_nodes,
            } => write!(
                f,
                "node {node} {side} child {child} is out of bounds ({n_nodes} nodes)"
            ),
            Self::HalfLeaf { node } => write!(f, "node {node} has exactly one child"),
            Self::SelfLoop { node } => write!(f, "node {node} references itself"),
            Self::DuplicateVisit { node } => write!(f, "node {node} has more than one parent"),
            Self::CycleDetected { node } => write!(f, "cycle through node {node}"),
            Self::UnreachableNode { node } => write!(f, "node {node} is unreachable"),
            Self::SplitFeatureOutOfRange {
                node,
                feature,
                n_features,
            } => write!(
                f,
                "node {node} splits on feature {feature} but only {n_features} features exist"
            ),
            Self::NonFiniteValue { node } => write!(f, "node {node} has a non-finite value"),
        }
    }
}

impl std::error::Error for TreeValidationError {}

// ============================================================================
// Tree
// ============================================================================

/// Immutable regression tree in structure-of-arrays layout.
///
/// Node `0` is the root. A node whose left and right children are both `0`
/// is a leaf (the root can never be a child). Internal nodes send a sample
/// left when `x[split_index] <= threshold`, matching scikit-learn trees.
///
/// `leaf_values` has one entry per node; entries of internal nodes are
/// ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Box<[u32]>,
    thresholds: Box<[f64]>,
    children_left: Box<[NodeId]>,
    children_right: Box<[NodeId]>,
    leaf_values: Box<[f64]>,
}

impl Tree {
    /// Build and validate a tree from per-node arrays.
    pub fn new(
        split_indices: Vec<u32>,
        thresholds: Vec<f64>,
        children_left: Vec<NodeId>,
        children_right: Vec<NodeId>,
        leaf_values: Vec<f64>,
    ) -> Result<Self, TreeValidationError> {
        let tree = Self {
            split_indices: split_indices.into_boxed_slice(),
            thresholds: thresholds.into_boxed_slice(),
            children_left: children_left.into_boxed_slice(),
            children_right: children_right.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
        };
        tree.validate()?;
        Ok(tree)
    }

    /// A single-leaf tree.
    pub fn leaf(value: f64) -> Self {
        Self {
            split_indices: Box::new([0]),
            thresholds: Box::new([0.0]),
            children_left: Box::new([0]),
            children_right: Box::new([0]),
            leaf_values: Box::new([value]),
        }
    }

    /// Number of nodes (internal + leaves).
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.leaf_values.len()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        let i = node as usize;
        self.children_left[i] == 0 && self.children_right[i] == 0
    }

    /// Split feature of an internal node.
    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    /// Split threshold of an internal node.
    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f64 {
        self.thresholds[node as usize]
    }

    /// Left child of an internal node.
    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.children_left[node as usize]
    }

    /// Right child of an internal node.
    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.children_right[node as usize]
    }

    /// Value stored at a node.
    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f64 {
        self.leaf_values[node as usize]
    }

    /// Raw per-node arrays, in constructor order (for serialization).
    pub fn arrays(&self) -> (&[u32], &[f64], &[NodeId], &[NodeId], &[f64]) {
        (
            &self.split_indices[..],
            &self.thresholds[..],
            &self.children_left[..],
            &self.children_right[..],
            &self.leaf_values[..],
        )
    }

    /// Largest feature index used by any split, or `None` for a single leaf.
    pub fn max_split_index(&self) -> Option<u32> {
        (0..self.n_nodes() as NodeId)
            .filter(|&n| !self.is_leaf(n))
            .map(|n| self.split_index(n))
            .max()
    }

    /// Traverse from the root to the leaf reached by `features`.
    #[inline]
    pub fn traverse_to_leaf(&self, features: ArrayView1<'_, f64>) -> NodeId {
        let mut node = 0;
        while !self.is_leaf(node) {
            let fvalue = features[self.split_index(node) as usize];
            node = if fvalue <= self.split_threshold(node) {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
        }
        node
    }

    /// Predict for a single row.
    #[inline]
    pub fn predict_row(&self, features: ArrayView1<'_, f64>) -> f64 {
        self.leaf_value(self.traverse_to_leaf(features))
    }

    /// Validate structural invariants.
    ///
    /// Checks array lengths, child bounds, self-loops, cycles, shared
    /// children and unreachable nodes, and that every value used during
    /// traversal is finite.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        for (array, len) in [
            ("split_indices", self.split_indices.len()),
            ("thresholds", self.thresholds.len()),
            ("children_left", self.children_left.len()),
            ("children_right", self.children_right.len()),
        ] {
            if len != n_nodes {
                return Err(TreeValidationError::ArrayLenMismatch {
                    array,
                    len,
                    n_nodes,
                });
            }
        }

        // Iterative DFS with color marking.
        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, u8)> = vec![(0, 0)];

        while let Some((node, phase)) = stack.pop() {
            let node_usize = node as usize;

            if phase == 1 {
                color[node_usize] = 2;
                continue;
            }

            match color[node_usize] {
                0 => {}
                1 => return Err(TreeValidationError::CycleDetected { node }),
                _ => return Err(TreeValidationError::DuplicateVisit { node }),
            }
            color[node_usize] = 1;
            stack.push((node, 1));

            let left = self.children_left[node_usize];
            let right = self.children_right[node_usize];

            if left == 0 && right == 0 {
                if !self.leaf_values[node_usize].is_finite() {
                    return Err(TreeValidationError::NonFiniteValue { node });
                }
                continue;
            }
            if left == 0 || right == 0 {
                return Err(TreeValidationError::HalfLeaf { node });
            }
            if left == node || right == node {
                return Err(TreeValidationError::SelfLoop { node });
            }
            for (side, child) in [("left", left), ("right", right)] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
            }
            if !self.thresholds[node_usize].is_finite() {
                return Err(TreeValidationError::NonFiniteValue { node });
            }

            stack.push((right, 0));
            stack.push((left, 0));
        }

        if let Some(i) = color.iter().position(|&c| c == 0) {
            return Err(TreeValidationError::UnreachableNode { node: i as NodeId });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// x0 <= 0.5 ? (x1 <= 2.0 ? 1.0 : 2.0) : 3.0
    fn two_level() -> Tree {
        Tree::new(
            vec![0, 1, 0, 0, 0],
            vec![0.5, 2.0, 0.0, 0.0, 0.0],
            vec![1, 3, 0, 0, 0],
            vec![2, 4, 0, 0, 0],
            vec![0.0, 0.0, 3.0, 1.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn traversal() {
        let tree = two_level();
        assert_eq!(tree.predict_row(array![0.0, 1.0].view()), 1.0);
        assert_eq!(tree.predict_row(array![0.0, 5.0].view()), 2.0);
        assert_eq!(tree.predict_row(array![1.0, 1.0].view()), 3.0);
    }

    #[test]
    fn threshold_goes_left() {
        let tree = two_level();
        assert_eq!(tree.predict_row(array![0.5, 2.0].view()), 1.0);
    }

    #[test]
    fn single_leaf() {
        let tree = Tree::leaf(2.5);
        assert!(tree.validate().is_ok());
        assert_eq!(tree.max_split_index(), None);
        assert_eq!(tree.predict_row(array![9.0].view()), 2.5);
    }

    #[test]
    fn max_split_index() {
        assert_eq!(two_level().max_split_index(), Some(1));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Tree::new(vec![0], vec![0.0, 0.0], vec![0], vec![0], vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            TreeValidationError::ArrayLenMismatch {
                array: "thresholds",
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_bounds_child() {
        let err = Tree::new(
            vec![0, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![1, 0, 0],
            vec![7, 0, 0],
            vec![0.0, 1.0, 2.0],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TreeValidationError::ChildOutOfBounds {
                node: 0,
                side: "right",
                child: 7,
                n_nodes: 3
            }
        );
    }

    #[test]
    fn rejects_shared_child_and_unreachable() {
        let err = Tree::new(
            vec![0, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![1, 0, 0],
            vec![1, 0, 0],
            vec![0.0, 1.0, 2.0],
        )
        .unwrap_err();
        assert_eq!(err, TreeValidationError::DuplicateVisit { node: 1 });

        let err = Tree::new(vec![0, 0], vec![0.0, 0.0], vec![0, 0], vec![0, 0], vec![1.0, 2.0])
            .unwrap_err();
        assert_eq!(err, TreeValidationError::UnreachableNode { node: 1 });
    }

    #[test]
    fn rejects_cycle_and_half_leaf() {
        // 0 -> (1, 2), 1 -> (3, 4), 3 -> (1, 2)
        let err = Tree::new(
            vec![0; 5],
            vec![0.5, 0.5, 0.0, 0.5, 0.0],
            vec![1, 3, 0, 1, 0],
            vec![2, 4, 0, 2, 0],
            vec![0.0; 5],
        )
        .unwrap_err();
        assert_eq!(err, TreeValidationError::CycleDetected { node: 1 });

        let err = Tree::new(
            vec![0, 0],
            vec![0.5, 0.0],
            vec![1, 0],
            vec![0, 0],
            vec![0.0, 1.0],
        )
        .unwrap_err();
        assert_eq!(err, TreeValidationError::HalfLeaf { node: 0 });
    }

    #[test]
    fn rejects_non_finite_leaf() {
        let err = Tree::new(vec![0], vec![0.0], vec![0], vec![0], vec![f64::NAN]).unwrap_err();
        assert_eq!(err, TreeValidationError::NonFiniteValue { node: 0 });
    }
}
