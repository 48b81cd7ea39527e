//! APERTURE desktop entry point.
//!
//! Loads the artifact bundle exactly once, then hands it to the form shell.
//! A failed load is reported in the window instead of aborting: the user
//! sees why prediction is unavailable.

mod app;
mod form;

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use crate::app::ApertureApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let loaded = aperture_artifact::load_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([440.0, 480.0])
            .with_title("Antenna Performance Predictor"),
        ..Default::default()
    };

    eframe::run_native(
        "Antenna Performance Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(ApertureApp::new(loaded)))),
    )
    .map_err(|e| anyhow!("ui event loop failed: {e}"))
}
