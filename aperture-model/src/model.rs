//! Regression model representations for the prediction pipeline.
//!
//! Models are fitted offline and exported as plain numbers; this module only
//! evaluates them. Two kinds are supported:
//! - linear: one coefficient row + intercept per output (covers OLS/ridge
//!   exports),
//! - forest: a flattened binary decision tree ensemble, predictions averaged
//!   across trees (covers random-forest exports).

use crate::PredictError;

/// A fitted, read-only regression model mapping a scaled feature vector to
/// one value per output target.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionModel {
    Linear(LinearModel),
    Forest(ForestModel),
}

impl RegressionModel {
    pub fn num_features(&self) -> usize {
        match self {
            RegressionModel::Linear(m) => m.num_features(),
            RegressionModel::Forest(m) => m.num_features,
        }
    }

    pub fn num_outputs(&self) -> usize {
        match self {
            RegressionModel::Linear(m) => m.num_outputs(),
            RegressionModel::Forest(m) => m.num_outputs,
        }
    }

    /// Evaluate the model on a scaled feature vector.
    pub fn predict(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        if features.len() != self.num_features() {
            return Err(PredictError::FeatureDimensionMismatch {
                expected: self.num_features(),
                got: features.len(),
            });
        }
        let outputs = match self {
            RegressionModel::Linear(m) => m.evaluate(features),
            RegressionModel::Forest(m) => m.evaluate(features),
        };
        Ok(outputs)
    }
}

/// Multi-output linear regression: `y[i] = coefficients[i] . x + intercepts[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    /// One row per output, one column per feature.
    pub coefficients: Vec<Vec<f64>>,
    /// One intercept per output.
    pub intercepts: Vec<f64>,
}

impl LinearModel {
    /// A model whose every output is the plain sum of its inputs.
    /// Used by tests as the simplest non-trivial fixture.
    pub fn sum_of_inputs(num_features: usize, num_outputs: usize) -> Self {
        Self {
            coefficients: vec![vec![1.0; num_features]; num_outputs],
            intercepts: vec![0.0; num_outputs],
        }
    }

    pub fn num_features(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    pub fn num_outputs(&self) -> usize {
        self.intercepts.len()
    }

    fn evaluate(&self, features: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(self.intercepts.iter())
            .map(|(row, intercept)| {
                row.iter()
                    .zip(features.iter())
                    .map(|(c, x)| c * x)
                    .sum::<f64>()
                    + intercept
            })
            .collect()
    }
}

/// A single flattened decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

/// One node of a flattened tree: either an internal split or a leaf holding
/// one value per output.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
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

impl DecisionTree {
    /// Walk from the root to a leaf. `x <= threshold` goes left, matching the
    /// export toolchain's convention.
    ///
    /// Node indices are validated at artifact-load time, so the walk itself
    /// cannot go out of bounds on a loaded model.
    fn evaluate<'a>(&'a self, features: &[f64]) -> &'a [f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { values } => return values,
            }
        }
    }
}

/// A decision tree ensemble; the prediction is the per-output mean of the
/// leaf values reached in each tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestModel {
    pub trees: Vec<DecisionTree>,
    pub num_features: usize,
    pub num_outputs: usize,
}

impl ForestModel {
    fn evaluate(&self, features: &[f64]) -> Vec<f64> {
        let mut totals = vec![0.0; self.num_outputs];
        for tree in &self.trees {
            for (total, value) in totals.iter_mut().zip(tree.evaluate(features)) {
                *total += value;
            }
        }
        let count = self.trees.len() as f64;
        totals.iter_mut().for_each(|t| *t /= count);
        totals
    }
}
