//! The prediction pipeline: one scaler, one model, one synchronous call.

use tracing::debug;

use crate::{
    DesignParameters, PerformanceMetrics, PredictError, RegressionModel, Scaler, METRIC_COUNT,
    METRIC_NAMES,
};

/// Owns the two loaded artifacts for the process lifetime and runs the
/// scale-then-predict pipeline.
///
/// `predict` is a pure function of the parameters and the artifacts; it keeps
/// no state between calls and is safe to invoke repeatedly.
#[derive(Debug, Clone)]
pub struct Predictor {
    scaler: Scaler,
    model: RegressionModel,
}

impl Predictor {
    pub fn new(scaler: Scaler, model: RegressionModel) -> Self {
        Self { scaler, model }
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn model(&self) -> &RegressionModel {
        &self.model
    }

    /// Scale the seven parameters, evaluate the model, pair the five outputs
    /// with their fixed metric names.
    pub fn predict(&self, params: &DesignParameters) -> Result<PerformanceMetrics, PredictError> {
        let features = params.to_vector();
        let scaled = self.scaler.transform(&features)?;
        let outputs = self.model.predict(&scaled)?;

        if outputs.len() != METRIC_COUNT {
            return Err(PredictError::OutputDimensionMismatch {
                expected: METRIC_COUNT,
                got: outputs.len(),
            });
        }

        let mut values = [0.0_f64; METRIC_COUNT];
        for (i, value) in outputs.iter().enumerate() {
            if !value.is_finite() {
                return Err(PredictError::NonFiniteOutput {
                    name: METRIC_NAMES[i],
                });
            }
            values[i] = *value;
        }

        debug!(?values, "prediction complete");
        Ok(PerformanceMetrics::from_vector(values))
    }
}
