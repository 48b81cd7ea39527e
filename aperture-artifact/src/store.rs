//! Load-once artifact store.
//!
//! The two artifact files live in an `artifacts/` directory resolved
//! deployment-relatively: next to the executable when packaged, at the
//! workspace root when running from source. No flags, no environment
//! variables. A missing or corrupt file is fatal for prediction — the caller
//! keeps the error and never gets a predictor.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use aperture_model::Predictor;

use crate::schema::{
    ModelArtifactV1, ProvenanceV1, ScalerArtifactV1, MODEL_FILE_NAME, SCALER_FILE_NAME,
};
use crate::ArtifactError;

/// Directory name searched at each candidate location.
pub const ARTIFACT_DIR_NAME: &str = "artifacts";

/// A successfully loaded bundle: the ready pipeline plus the provenance of
/// the model that backs it.
#[derive(Debug, Clone)]
pub struct LoadedPredictor {
    pub predictor: Predictor,
    pub provenance: ProvenanceV1,
}

/// Resolve the artifact directory and load both files.
pub fn load_default() -> Result<LoadedPredictor, ArtifactError> {
    let dir = resolve_artifact_dir()?;
    load_bundle(&dir)
}

/// Find the first candidate directory containing both artifact files.
///
/// Candidates, in order: `artifacts/` next to the running executable (the
/// packaged layout), then `artifacts/` at the workspace root (the
/// run-from-source layout).
pub fn resolve_artifact_dir() -> Result<PathBuf, ArtifactError> {
    let mut searched = Vec::new();

    if let Ok(exe) = std::env::current_exe() {
        if let Some(exe_dir) = exe.parent() {
            let candidate = exe_dir.join(ARTIFACT_DIR_NAME);
            if contains_bundle(&candidate) {
                return Ok(candidate);
            }
            searched.push(candidate);
        }
    }

    if let Some(workspace) = Path::new(env!("CARGO_MANIFEST_DIR")).parent() {
        let candidate = workspace.join(ARTIFACT_DIR_NAME);
        if contains_bundle(&candidate) {
            return Ok(candidate);
        }
        searched.push(candidate);
    }

    Err(ArtifactError::DirectoryNotFound { searched })
}

fn contains_bundle(dir: &Path) -> bool {
    dir.join(SCALER_FILE_NAME).is_file() && dir.join(MODEL_FILE_NAME).is_file()
}

/// Load, validate and convert both artifact files from `dir`.
pub fn load_bundle(dir: &Path) -> Result<LoadedPredictor, ArtifactError> {
    debug!(dir = %dir.display(), "loading artifact bundle");

    let scaler_doc: ScalerArtifactV1 = read_json(&dir.join(SCALER_FILE_NAME))?;
    let model_doc: ModelArtifactV1 = read_json(&dir.join(MODEL_FILE_NAME))?;

    let provenance = model_doc.provenance.clone();
    let scaler = scaler_doc.into_scaler()?;
    let model = model_doc.into_model()?;

    info!(
        run_id = %provenance.run_id,
        exported_by = %provenance.exported_by,
        dir = %dir.display(),
        "artifact bundle loaded"
    );

    Ok(LoadedPredictor {
        predictor: Predictor::new(scaler, model),
        provenance,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let data = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a bundle as pretty JSON. Export-side and test helper; the
/// application itself only ever reads.
pub fn save_bundle(
    dir: impl AsRef<Path>,
    scaler: &ScalerArtifactV1,
    model: &ModelArtifactV1,
) -> anyhow::Result<()> {
    let dir = dir.as_ref();

    // fs::write does NOT create directories; tests may run with missing `target/`
    fs::create_dir_all(dir).with_context(|| format!("create artifact dir: {}", dir.display()))?;

    let scaler_path = dir.join(SCALER_FILE_NAME);
    let json = serde_json::to_string_pretty(scaler).context("serialize scaler artifact")?;
    fs::write(&scaler_path, json)
        .with_context(|| format!("write scaler artifact: {}", scaler_path.display()))?;

    let model_path = dir.join(MODEL_FILE_NAME);
    let json = serde_json::to_string_pretty(model).context("serialize model artifact")?;
    fs::write(&model_path, json)
        .with_context(|| format!("write model artifact: {}", model_path.display()))?;

    Ok(())
}
