// The prediction form for the APERTURE UI.
// Collects the seven design parameters, runs the pipeline on Predict,
// shows the five metrics or the error that stopped them.

use aperture_model::{DesignParameters, Predictor, PARAMETER_LABELS, PARAM_COUNT};
use egui::Color32;
use tracing::{debug, warn};

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutput {
    Idle,
    Metrics(String),
    Error(String),
}

/// Form state. Kept independent of egui so the submit path is testable
/// without a windowing backend.
#[derive(Debug, Clone)]
pub struct PredictorForm {
    pub fields: [String; PARAM_COUNT],
    pub output: FormOutput,
}

impl Default for PredictorForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictorForm {
    pub fn new() -> Self {
        Self {
            fields: Default::default(),
            output: FormOutput::Idle,
        }
    }

    /// Parse the current entries and run one prediction.
    ///
    /// Every failure ends up in `output` as a message; nothing here panics on
    /// user input.
    pub fn submit(&mut self, predictor: &Predictor) {
        let raw: [&str; PARAM_COUNT] = std::array::from_fn(|i| self.fields[i].as_str());
        self.output = match DesignParameters::parse(raw) {
            Ok(params) => match predictor.predict(&params) {
                Ok(metrics) => FormOutput::Metrics(metrics.format_lines()),
                Err(e) => {
                    warn!("prediction failed: {e}");
                    FormOutput::Error(format!("Prediction error: {e}"))
                }
            },
            Err(e) => {
                debug!("input rejected: {e}");
                FormOutput::Error(format!("Invalid input: {e}"))
            }
        };
    }

    /// Draw the form. `predictor` is `None` when artifact loading failed at
    /// startup; the Predict button stays disabled for the process lifetime.
    pub fn ui(&mut self, ui: &mut egui::Ui, predictor: Option<&Predictor>) {
        egui::Grid::new("design_parameters")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (i, label) in PARAMETER_LABELS.iter().enumerate() {
                    ui.label(*label);
                    ui.add(egui::TextEdit::singleline(&mut self.fields[i]).desired_width(120.0));
                    ui.end_row();
                }
            });

        ui.add_space(10.0);
        let predict = ui.add_enabled(predictor.is_some(), egui::Button::new("Predict"));
        if predict.clicked() {
            if let Some(predictor) = predictor {
                self.submit(predictor);
            }
        }

        ui.add_space(10.0);
        match &self.output {
            FormOutput::Idle => {
                ui.label("Predicted performance metrics will appear here");
            }
            FormOutput::Metrics(text) => {
                ui.colored_label(Color32::from_rgb(40, 80, 200), text);
            }
            FormOutput::Error(text) => {
                ui.colored_label(Color32::RED, text);
            }
        }
    }
}
