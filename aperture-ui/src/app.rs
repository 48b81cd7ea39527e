// App shell: holds the artifacts loaded once at startup and drives the form.

use aperture_artifact::{ArtifactError, LoadedPredictor};
use aperture_model::Predictor;
use tracing::error;

use crate::form::PredictorForm;

pub struct ApertureApp {
    /// `None` when artifact loading failed; prediction stays disabled.
    predictor: Option<Predictor>,
    load_error: Option<String>,
    form: PredictorForm,
}

impl ApertureApp {
    pub fn new(loaded: Result<LoadedPredictor, ArtifactError>) -> Self {
        match loaded {
            Ok(loaded) => Self {
                predictor: Some(loaded.predictor),
                load_error: None,
                form: PredictorForm::new(),
            },
            Err(e) => {
                error!("failed to load model and scaler: {e}");
                Self {
                    predictor: None,
                    load_error: Some(format!("Failed to load model and scaler: {e}")),
                    form: PredictorForm::new(),
                }
            }
        }
    }
}

impl eframe::App for ApertureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Antenna Performance Predictor");
            ui.add_space(10.0);

            if let Some(message) = &self.load_error {
                ui.colored_label(egui::Color32::RED, message);
                ui.add_space(10.0);
            }

            self.form.ui(ui, self.predictor.as_ref());
        });
    }
}
