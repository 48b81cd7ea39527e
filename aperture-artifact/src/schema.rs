//! Versioned JSON schema for the two exported artifact files.
//!
//! The export toolchain converts the fitted scaler and regression model into
//! these documents at export time. Parsing is strict: unknown fields are
//! rejected so a schema drift on the export side fails loudly here instead of
//! silently mispredicting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aperture_model::{
    DecisionTree, ForestModel, LinearModel, RegressionModel, Scaler, TreeNode, FEATURE_NAMES,
    METRIC_NAMES,
};

use crate::ArtifactError;

/// Schema version this build reads and writes.
pub const ARTIFACT_SCHEMA_VERSION: &str = "1.0";

/// Fixed file names inside the artifact directory.
pub const SCALER_FILE_NAME: &str = "scaler.json";
pub const MODEL_FILE_NAME: &str = "model.json";

/// Exported feature scaler document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalerArtifactV1 {
    pub schema_version: String,
    /// Must match the canonical feature order exactly.
    pub feature_names: Vec<String>,
    pub kind: ScalerKindV1,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum ScalerKindV1 {
    /// z-score scaling: `(x - mean) / scale` per feature.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// range scaling: `(x - min) * scale` per feature.
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

/// Exported regression model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelArtifactV1 {
    pub schema_version: String,
    pub num_features: usize,
    /// Must match the canonical metric order exactly.
    pub target_names: Vec<String>,
    pub provenance: ProvenanceV1,
    pub kind: ModelKindV1,
}

/// Where the artifact came from. Carried for log lines and bug reports, never
/// used in the pipeline itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvenanceV1 {
    /// Training run that produced this bundle.
    pub run_id: Uuid,
    /// Export tool + library versions, free-form.
    pub exported_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum ModelKindV1 {
    Linear {
        /// One row per target, one column per feature.
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
    Forest {
        trees: Vec<TreeV1>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeV1 {
    pub nodes: Vec<TreeNodeV1>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum TreeNodeV1 {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        values: Vec<f64>,
    },
}

fn invalid(artifact: &'static str, reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        artifact,
        reason: reason.into(),
    }
}

fn check_version(found: &str) -> Result<(), ArtifactError> {
    if found != ARTIFACT_SCHEMA_VERSION {
        return Err(ArtifactError::SchemaVersion {
            found: found.to_string(),
            supported: ARTIFACT_SCHEMA_VERSION,
        });
    }
    Ok(())
}

fn check_all_finite(artifact: &'static str, what: &str, values: &[f64]) -> Result<(), ArtifactError> {
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(invalid(artifact, format!("{what} contains non-finite value {bad}")));
    }
    Ok(())
}

impl ScalerArtifactV1 {
    /// Validate the document and convert it into the runtime scaler.
    pub fn into_scaler(self) -> Result<Scaler, ArtifactError> {
        check_version(&self.schema_version)?;

        if self.feature_names != FEATURE_NAMES {
            return Err(invalid(
                "scaler",
                format!(
                    "feature_names {:?} do not match the expected order {:?}",
                    self.feature_names, FEATURE_NAMES
                ),
            ));
        }
        let expected = FEATURE_NAMES.len();

        match self.kind {
            ScalerKindV1::Standard { mean, scale } => {
                check_feature_vector("scaler", "mean", &mean, expected)?;
                check_feature_vector("scaler", "scale", &scale, expected)?;
                if let Some(i) = scale.iter().position(|s| *s == 0.0) {
                    return Err(invalid(
                        "scaler",
                        format!("scale is zero for feature '{}'", FEATURE_NAMES[i]),
                    ));
                }
                Ok(Scaler::Standard { mean, scale })
            }
            ScalerKindV1::MinMax { min, scale } => {
                check_feature_vector("scaler", "min", &min, expected)?;
                check_feature_vector("scaler", "scale", &scale, expected)?;
                Ok(Scaler::MinMax { min, scale })
            }
        }
    }
}

fn check_feature_vector(
    artifact: &'static str,
    what: &str,
    values: &[f64],
    expected: usize,
) -> Result<(), ArtifactError> {
    if values.len() != expected {
        return Err(invalid(
            artifact,
            format!("{what} has {} entries, expected {expected}", values.len()),
        ));
    }
    check_all_finite(artifact, what, values)
}

impl ModelArtifactV1 {
    /// Validate the document and convert it into the runtime model.
    pub fn into_model(self) -> Result<RegressionModel, ArtifactError> {
        check_version(&self.schema_version)?;

        if self.num_features != FEATURE_NAMES.len() {
            return Err(invalid(
                "model",
                format!(
                    "num_features is {}, this pipeline feeds {}",
                    self.num_features,
                    FEATURE_NAMES.len()
                ),
            ));
        }
        if self.target_names != METRIC_NAMES {
            return Err(invalid(
                "model",
                format!(
                    "target_names {:?} do not match the expected order {:?}",
                    self.target_names, METRIC_NAMES
                ),
            ));
        }
        let num_features = self.num_features;
        let num_outputs = METRIC_NAMES.len();

        match self.kind {
            ModelKindV1::Linear {
                coefficients,
                intercepts,
            } => {
                if coefficients.len() != num_outputs {
                    return Err(invalid(
                        "model",
                        format!(
                            "coefficients has {} rows, expected one per target ({num_outputs})",
                            coefficients.len()
                        ),
                    ));
                }
                for (i, row) in coefficients.iter().enumerate() {
                    if row.len() != num_features {
                        return Err(invalid(
                            "model",
                            format!(
                                "coefficient row for {} has {} entries, expected {num_features}",
                                METRIC_NAMES[i],
                                row.len()
                            ),
                        ));
                    }
                    check_all_finite("model", "coefficients", row)?;
                }
                if intercepts.len() != num_outputs {
                    return Err(invalid(
                        "model",
                        format!(
                            "intercepts has {} entries, expected {num_outputs}",
                            intercepts.len()
                        ),
                    ));
                }
                check_all_finite("model", "intercepts", &intercepts)?;

                Ok(RegressionModel::Linear(LinearModel {
                    coefficients,
                    intercepts,
                }))
            }
            ModelKindV1::Forest { trees } => {
                if trees.is_empty() {
                    return Err(invalid("model", "forest has no trees"));
                }
                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(i, tree)| convert_tree(i, tree, num_features, num_outputs))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(RegressionModel::Forest(ForestModel {
                    trees,
                    num_features,
                    num_outputs,
                }))
            }
        }
    }
}

/// Convert one flattened tree, checking that every walk terminates: children
/// must point strictly forward in the node array, the way the export
/// toolchain writes them.
fn convert_tree(
    tree_index: usize,
    tree: TreeV1,
    num_features: usize,
    num_outputs: usize,
) -> Result<DecisionTree, ArtifactError> {
    if tree.nodes.is_empty() {
        return Err(invalid("model", format!("tree {tree_index} has no nodes")));
    }
    let node_count = tree.nodes.len();

    let nodes = tree
        .nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| match node {
            TreeNodeV1::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if feature >= num_features {
                    return Err(invalid(
                        "model",
                        format!("tree {tree_index} node {i} splits on feature {feature}, only {num_features} exist"),
                    ));
                }
                if !threshold.is_finite() {
                    return Err(invalid(
                        "model",
                        format!("tree {tree_index} node {i} has non-finite threshold"),
                    ));
                }
                for (side, child) in [("left", left), ("right", right)] {
                    if child <= i || child >= node_count {
                        return Err(invalid(
                            "model",
                            format!(
                                "tree {tree_index} node {i} {side} child {child} is out of range"
                            ),
                        ));
                    }
                }
                Ok(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                })
            }
            TreeNodeV1::Leaf { values } => {
                if values.len() != num_outputs {
                    return Err(invalid(
                        "model",
                        format!(
                            "tree {tree_index} node {i} leaf has {} values, expected {num_outputs}",
                            values.len()
                        ),
                    ));
                }
                check_all_finite("model", "leaf values", &values)?;
                Ok(TreeNode::Leaf { values })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DecisionTree { nodes })
}
