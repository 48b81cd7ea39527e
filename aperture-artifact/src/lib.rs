//! aperture-artifact: the exported artifact format for APERTURE.
//!
//! This defines the JSON format that we accept from the offline training
//! toolchain (one scaler file, one model file, exported next to each other).
//! Parse and validate it, then convert it to what the rest of APERTURE can
//! understand. Nothing outside this crate touches the serialized form.

use std::path::PathBuf;

use thiserror::Error;

pub mod schema;
pub mod store;

pub use schema::{
    ModelArtifactV1, ModelKindV1, ProvenanceV1, ScalerArtifactV1, ScalerKindV1, TreeNodeV1,
    TreeV1, ARTIFACT_SCHEMA_VERSION, MODEL_FILE_NAME, SCALER_FILE_NAME,
};
pub use store::{load_bundle, load_default, resolve_artifact_dir, save_bundle, LoadedPredictor};

/// Anything that stops the artifact bundle from loading. Fatal at startup:
/// the shell reports it once and prediction stays disabled.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported artifact schema version '{found}' (this build reads '{supported}')")]
    SchemaVersion {
        found: String,
        supported: &'static str,
    },

    #[error("invalid {artifact} artifact: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },

    #[error("no artifact directory found (searched: {})", format_searched(.searched))]
    DirectoryNotFound { searched: Vec<PathBuf> },
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
