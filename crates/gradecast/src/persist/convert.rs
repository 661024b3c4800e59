//! Conversion between runtime types and schema types.
//!
//! Runtime → schema conversions are lossless `From` impls. Schema → runtime
//! conversions are `TryFrom` and run every structural check, reporting
//! failures as [`ReadError::Validation`].

use ndarray::Array1;

use super::error::ReadError;
use super::schema::{
    AggregationSchema, ArtifactKind, ArtifactMetaSchema, ModelArtifactSchema, ModelSchema,
    ScalerArtifactSchema, ScalerSchema, TreeSchema, FORMAT_VERSION,
};
use crate::repr::{
    Aggregation, ArtifactMeta, Forest, LinearModel, MinMaxScaler, ModelArtifact, RegressionModel,
    Scaler, ScalerArtifact, StandardScaler, Tree,
};

fn invalid(what: &str, err: impl std::fmt::Display) -> ReadError {
    ReadError::Validation(format!("{what}: {err}"))
}

fn check_kind(expected: ArtifactKind, found: ArtifactKind) -> Result<(), ReadError> {
    if expected == found {
        Ok(())
    } else {
        Err(ReadError::KindMismatch { expected, found })
    }
}

fn check_width(what: &str, meta: &ArtifactMeta, actual: usize) -> Result<(), ReadError> {
    if meta.n_features == actual {
        return Ok(());
    }
    Err(ReadError::Validation(format!(
        "{what} has {actual} inputs but meta.n_features is {}",
        meta.n_features
    )))
}

// =============================================================================
// Meta
// =============================================================================

impl From<&ArtifactMeta> for ArtifactMetaSchema {
    fn from(meta: &ArtifactMeta) -> Self {
        Self {
            n_features: meta.n_features,
            feature_names: meta.feature_names.clone(),
            producer: meta.producer.clone(),
        }
    }
}

impl TryFrom<ArtifactMetaSchema> for ArtifactMeta {
    type Error = ReadError;

    fn try_from(schema: ArtifactMetaSchema) -> Result<Self, Self::Error> {
        if schema.n_features == 0 {
            return Err(ReadError::Validation("meta.n_features must be positive".into()));
        }
        if let Some(names) = &schema.feature_names {
            if names.len() != schema.n_features {
                return Err(ReadError::Validation(format!(
                    "meta.feature_names has {} entries but n_features is {}",
                    names.len(),
                    schema.n_features
                )));
            }
        }
        Ok(Self {
            n_features: schema.n_features,
            feature_names: schema.feature_names,
            producer: schema.producer,
        })
    }
}

// =============================================================================
// Scaler
// =============================================================================

impl From<&Scaler> for ScalerSchema {
    fn from(scaler: &Scaler) -> Self {
        match scaler {
            Scaler::Standard(s) => ScalerSchema::Standard {
                mean: s.mean().map(|m| m.to_vec()),
                scale: s.scale().map(|s| s.to_vec()),
            },
            Scaler::MinMax(s) => ScalerSchema::MinMax {
                min: s.min().to_vec(),
                scale: s.scale().to_vec(),
            },
            Scaler::Identity { .. } => ScalerSchema::Identity,
        }
    }
}

/// Build a runtime scaler; width-free variants take it from the metadata.
fn scaler_from_schema(schema: ScalerSchema, n_features: usize) -> Result<Scaler, ReadError> {
    Ok(match schema {
        ScalerSchema::Standard { mean, scale } => Scaler::Standard(
            StandardScaler::new(n_features, mean.map(Array1::from), scale.map(Array1::from))
                .map_err(|e| invalid("standard scaler", e))?,
        ),
        ScalerSchema::MinMax { min, scale } => Scaler::MinMax(
            MinMaxScaler::new(Array1::from(min), Array1::from(scale))
                .map_err(|e| invalid("min-max scaler", e))?,
        ),
        ScalerSchema::Identity => Scaler::Identity { n_features },
    })
}

impl From<&ScalerArtifact> for ScalerArtifactSchema {
    fn from(artifact: &ScalerArtifact) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            kind: ArtifactKind::Scaler,
            meta: (&artifact.meta).into(),
            scaler: (&artifact.scaler).into(),
        }
    }
}

impl TryFrom<ScalerArtifactSchema> for ScalerArtifact {
    type Error = ReadError;

    fn try_from(schema: ScalerArtifactSchema) -> Result<Self, Self::Error> {
        check_kind(ArtifactKind::Scaler, schema.kind)?;
        let meta = ArtifactMeta::try_from(schema.meta)?;
        let scaler = scaler_from_schema(schema.scaler, meta.n_features)?;
        check_width("scaler", &meta, scaler.n_features())?;
        Ok(Self { meta, scaler })
    }
}

// =============================================================================
// Trees / Forest
// =============================================================================

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        let (split_indices, thresholds, children_left, children_right, leaf_values) =
            tree.arrays();
        Self {
            split_indices: split_indices.to_vec(),
            thresholds: thresholds.to_vec(),
            children_left: children_left.to_vec(),
            children_right: children_right.to_vec(),
            leaf_values: leaf_values.to_vec(),
        }
    }
}

impl TryFrom<TreeSchema> for Tree {
    type Error = ReadError;

    fn try_from(schema: TreeSchema) -> Result<Self, Self::Error> {
        Tree::new(
            schema.split_indices,
            schema.thresholds,
            schema.children_left,
            schema.children_right,
            schema.leaf_values,
        )
        .map_err(|e| invalid("tree", e))
    }
}

/// Tag a tree error with its position in the forest.
fn at_tree(index: usize, err: ReadError) -> ReadError {
    match err {
        ReadError::Validation(msg) => {
            let detail = msg.strip_prefix("tree: ").unwrap_or(msg.as_str());
            ReadError::Validation(format!("tree {index}: {detail}"))
        }
        other => other,
    }
}

impl From<Aggregation> for AggregationSchema {
    fn from(aggregation: Aggregation) -> Self {
        match aggregation {
            Aggregation::Sum { base_score } => AggregationSchema::Sum { base_score },
            Aggregation::Mean => AggregationSchema::Mean,
        }
    }
}

impl From<AggregationSchema> for Aggregation {
    fn from(schema: AggregationSchema) -> Self {
        match schema {
            AggregationSchema::Sum { base_score } => Aggregation::Sum { base_score },
            AggregationSchema::Mean => Aggregation::Mean,
        }
    }
}

// =============================================================================
// Model
// =============================================================================

impl From<&RegressionModel> for ModelSchema {
    fn from(model: &RegressionModel) -> Self {
        match model {
            RegressionModel::Linear(m) => ModelSchema::Linear {
                coefficients: m.coefficients().to_vec(),
                intercept: m.intercept(),
            },
            RegressionModel::Forest(f) => ModelSchema::Forest {
                aggregation: f.aggregation().into(),
                trees: f.trees().map(TreeSchema::from).collect(),
            },
        }
    }
}

fn model_from_schema(schema: ModelSchema, n_features: usize) -> Result<RegressionModel, ReadError> {
    match schema {
        ModelSchema::Linear {
            coefficients,
            intercept,
        } => {
            if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
                return Err(ReadError::Validation(format!(
                    "linear model: coefficient {i} is not finite"
                )));
            }
            if !intercept.is_finite() {
                return Err(ReadError::Validation(
                    "linear model: intercept is not finite".into(),
                ));
            }
            Ok(LinearModel::new(Array1::from(coefficients), intercept).into())
        }
        ModelSchema::Forest { aggregation, trees } => {
            let mut forest = Forest::new(n_features, aggregation.into());
            for (i, tree) in trees.into_iter().enumerate() {
                forest.push_tree(Tree::try_from(tree).map_err(|e| at_tree(i, e))?);
            }
            forest.validate().map_err(|e| invalid("forest", e))?;
            Ok(forest.into())
        }
    }
}

impl From<&ModelArtifact> for ModelArtifactSchema {
    fn from(artifact: &ModelArtifact) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            kind: ArtifactKind::Model,
            meta: (&artifact.meta).into(),
            model: (&artifact.model).into(),
        }
    }
}

impl TryFrom<ModelArtifactSchema> for ModelArtifact {
    type Error = ReadError;

    fn try_from(schema: ModelArtifactSchema) -> Result<Self, Self::Error> {
        check_kind(ArtifactKind::Model, schema.kind)?;
        let meta = ArtifactMeta::try_from(schema.meta)?;
        let model = model_from_schema(schema.model, meta.n_features)?;
        check_width("model", &meta, model.n_features())?;
        Ok(Self { meta, model })
    }
}
