//! aperture-model: deterministic parameter -> metrics pipeline for APERTURE.
//!
//! Design rules:
//! - The pipeline is a pure function of its input and the two loaded artifacts.
//! - Scaling and prediction are deterministic: identical inputs give identical
//!   outputs across repeated calls.
//! - Inputs are parsed, never range-validated. The training data decides what
//!   a sensible design looks like, not this crate; a negative substrate height
//!   is accepted on purpose.
//! - Runtime types carry no serialization of their own. The exported artifact
//!   schema in aperture-artifact is the only serialization boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod model;
pub mod predictor;
pub mod scaler;

pub use model::{DecisionTree, ForestModel, LinearModel, RegressionModel, TreeNode};
pub use predictor::Predictor;
pub use scaler::Scaler;

/// Number of design parameters the pipeline consumes.
pub const PARAM_COUNT: usize = 7;

/// Number of performance metrics the pipeline produces.
pub const METRIC_COUNT: usize = 5;

/// Canonical feature order. Exported artifacts must list features in exactly
/// this order; the loader rejects anything else.
pub const FEATURE_NAMES: [&str; PARAM_COUNT] = [
    "patch_length_mm",
    "patch_width_mm",
    "slot_length_mm",
    "slot_width_mm",
    "substrate_height_mm",
    "relative_permittivity",
    "frequency_ghz",
];

/// Human-facing labels for the same fields, in the same order.
/// Used for form labels and for naming the field in parse errors.
pub const PARAMETER_LABELS: [&str; PARAM_COUNT] = [
    "Patch Length (mm)",
    "Patch Width (mm)",
    "Slot Length (mm)",
    "Slot Width (mm)",
    "Substrate Height (mm)",
    "Relative Permittivity",
    "Frequency (GHz)",
];

/// Fixed display order of the predicted metrics.
pub const METRIC_NAMES: [&str; METRIC_COUNT] = [
    "Gain_dB",
    "Directivity",
    "S11_dB",
    "Bandwidth_MHz",
    "Radiation_Efficiency",
];

/// The seven antenna design parameters, in canonical order.
///
/// Units are implied: millimetres for the four geometry fields and the
/// substrate height, dimensionless permittivity, gigahertz for frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    pub patch_length_mm: f64,
    pub patch_width_mm: f64,
    pub slot_length_mm: f64,
    pub slot_width_mm: f64,
    pub substrate_height_mm: f64,
    pub relative_permittivity: f64,
    pub frequency_ghz: f64,
}

impl DesignParameters {
    /// Parse seven raw text fields (form entries) in canonical order.
    ///
    /// Every field must parse as a finite `f64`. Whitespace is trimmed first.
    /// The first offending field aborts the parse; its label ends up in the
    /// returned [`InputError`].
    pub fn parse(fields: [&str; PARAM_COUNT]) -> Result<Self, InputError> {
        let mut values = [0.0_f64; PARAM_COUNT];
        for (i, raw) in fields.iter().enumerate() {
            let field = PARAMETER_LABELS[i];
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(InputError::Empty { field });
            }
            let value: f64 = trimmed.parse().map_err(|_| InputError::NotANumber {
                field,
                value: trimmed.to_string(),
            })?;
            // "NaN" and "inf" parse successfully; they are still not inputs
            // the model can do anything meaningful with.
            if !value.is_finite() {
                return Err(InputError::NotFinite { field, value });
            }
            values[i] = value;
        }
        Ok(Self::from_vector(values))
    }

    /// Build from a feature vector in canonical order.
    pub fn from_vector(v: [f64; PARAM_COUNT]) -> Self {
        Self {
            patch_length_mm: v[0],
            patch_width_mm: v[1],
            slot_length_mm: v[2],
            slot_width_mm: v[3],
            substrate_height_mm: v[4],
            relative_permittivity: v[5],
            frequency_ghz: v[6],
        }
    }

    /// The feature vector the scaler consumes, in canonical order.
    pub fn to_vector(&self) -> [f64; PARAM_COUNT] {
        [
            self.patch_length_mm,
            self.patch_width_mm,
            self.slot_length_mm,
            self.slot_width_mm,
            self.substrate_height_mm,
            self.relative_permittivity,
            self.frequency_ghz,
        ]
    }
}

/// The five predicted performance metrics, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub gain_db: f64,
    pub directivity: f64,
    pub s11_db: f64,
    pub bandwidth_mhz: f64,
    pub radiation_efficiency: f64,
}

impl PerformanceMetrics {
    /// Build from a model output vector in canonical order.
    pub fn from_vector(v: [f64; METRIC_COUNT]) -> Self {
        Self {
            gain_db: v[0],
            directivity: v[1],
            s11_db: v[2],
            bandwidth_mhz: v[3],
            radiation_efficiency: v[4],
        }
    }

    pub fn to_vector(&self) -> [f64; METRIC_COUNT] {
        [
            self.gain_db,
            self.directivity,
            self.s11_db,
            self.bandwidth_mhz,
            self.radiation_efficiency,
        ]
    }

    /// `(name, value)` pairs in the fixed display order.
    pub fn named_values(&self) -> [(&'static str, f64); METRIC_COUNT] {
        let v = self.to_vector();
        [
            (METRIC_NAMES[0], v[0]),
            (METRIC_NAMES[1], v[1]),
            (METRIC_NAMES[2], v[2]),
            (METRIC_NAMES[3], v[3]),
            (METRIC_NAMES[4], v[4]),
        ]
    }

    /// One `"<name>: <value>"` line per metric, two decimals, fixed order.
    pub fn format_lines(&self) -> String {
        self.named_values()
            .iter()
            .map(|(name, value)| format!("{name}: {value:.2}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A form field the user needs to correct before predicting.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field}: '{value}' is not a number")]
    NotANumber { field: &'static str, value: String },

    #[error("{field}: {value} is not a finite number")]
    NotFinite { field: &'static str, value: f64 },
}

/// The transform/predict call itself failed. Reported, never retried.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("feature vector has {got} values, expected {expected}")]
    FeatureDimensionMismatch { expected: usize, got: usize },

    #[error("model produced {got} outputs, expected {expected}")]
    OutputDimensionMismatch { expected: usize, got: usize },

    #[error("model produced a non-finite value for {name}")]
    NonFiniteOutput { name: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed_fields() {
        let params =
            DesignParameters::parse(["40.0", "30.0", "10.0", "2.0", "1.6", "4.4", "2.4"]).unwrap();
        assert_eq!(params.patch_length_mm, 40.0);
        assert_eq!(params.frequency_ghz, 2.4);
        assert_eq!(
            params.to_vector(),
            [40.0, 30.0, 10.0, 2.0, 1.6, 4.4, 2.4]
        );
    }

    #[test]
    fn parse_trims_whitespace() {
        let params =
            DesignParameters::parse([" 40 ", "30", "10", "2", "1.6", "4.4", "2.4"]).unwrap();
        assert_eq!(params.patch_length_mm, 40.0);
    }

    #[test]
    fn parse_rejects_text() {
        let err =
            DesignParameters::parse(["40", "30", "ten", "2", "1.6", "4.4", "2.4"]).unwrap_err();
        match err {
            InputError::NotANumber { field, value } => {
                assert_eq!(field, "Slot Length (mm)");
                assert_eq!(value, "ten");
            }
            other => panic!("expected NotANumber, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_empty_field() {
        let err = DesignParameters::parse(["40", "30", "10", "", "1.6", "4.4", "2.4"]).unwrap_err();
        assert!(matches!(err, InputError::Empty { field: "Slot Width (mm)" }));
    }

    #[test]
    fn parse_rejects_nan_and_infinity() {
        // Both parse as f64, so the finite check has to catch them.
        let err =
            DesignParameters::parse(["NaN", "30", "10", "2", "1.6", "4.4", "2.4"]).unwrap_err();
        assert!(matches!(err, InputError::NotFinite { .. }));

        let err =
            DesignParameters::parse(["40", "inf", "10", "2", "1.6", "4.4", "2.4"]).unwrap_err();
        assert!(matches!(err, InputError::NotFinite { .. }));
    }

    #[test]
    fn negative_substrate_height_is_accepted() {
        // Deliberately permissive: no physical-range validation.
        let params =
            DesignParameters::parse(["40", "30", "10", "2", "-1.6", "4.4", "2.4"]).unwrap();
        assert_eq!(params.substrate_height_mm, -1.6);
    }

    #[test]
    fn metrics_keep_fixed_order() {
        let metrics = PerformanceMetrics::from_vector([1.0, 2.0, 3.0, 4.0, 5.0]);
        let names: Vec<&str> = metrics.named_values().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            ["Gain_dB", "Directivity", "S11_dB", "Bandwidth_MHz", "Radiation_Efficiency"]
        );
    }

    #[test]
    fn formatting_rounds_to_two_decimals() {
        let metrics = PerformanceMetrics::from_vector([12.345, -3.0, 0.0, 250.5, 100.0]);
        let text = metrics.format_lines();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Gain_dB: 12.35");
        assert_eq!(lines[1], "Directivity: -3.00");
        assert_eq!(lines[2], "S11_dB: 0.00");
        assert_eq!(lines[3], "Bandwidth_MHz: 250.50");
        assert_eq!(lines[4], "Radiation_Efficiency: 100.00");
        assert_eq!(lines.len(), METRIC_COUNT);
    }
}
