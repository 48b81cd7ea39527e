//! Feature scaling for the prediction pipeline.
//!
//! A scaler is a deterministic per-feature transform fitted offline and
//! exported alongside the model. Two kinds cover what the export toolchain
//! emits: standard (z-score) and min-max scaling.

use crate::PredictError;

/// A fitted, read-only feature scaler.
#[derive(Debug, Clone, PartialEq)]
pub enum Scaler {
    /// `(x - mean) / scale` per feature.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `(x - min) * scale` per feature.
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl Scaler {
    /// A scaler that passes features through unchanged.
    ///
    /// Not something the export toolchain produces; used by tests and as the
    /// simplest valid `Standard` instance.
    pub fn identity(num_features: usize) -> Self {
        Scaler::Standard {
            mean: vec![0.0; num_features],
            scale: vec![1.0; num_features],
        }
    }

    /// How many features this scaler was fitted on.
    pub fn num_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { min, .. } => min.len(),
        }
    }

    /// Apply the fitted transform to a raw feature vector.
    ///
    /// Fails only on a length mismatch; the fitted vectors themselves are
    /// validated at artifact-load time.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictError> {
        if features.len() != self.num_features() {
            return Err(PredictError::FeatureDimensionMismatch {
                expected: self.num_features(),
                got: features.len(),
            });
        }

        let scaled = match self {
            Scaler::Standard { mean, scale } => features
                .iter()
                .zip(mean.iter().zip(scale.iter()))
                .map(|(x, (m, s))| (x - m) / s)
                .collect(),
            Scaler::MinMax { min, scale } => features
                .iter()
                .zip(min.iter().zip(scale.iter()))
                .map(|(x, (lo, s))| (x - lo) * s)
                .collect(),
        };

        Ok(scaled)
    }
}
