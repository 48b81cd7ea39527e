use std::path::Path;

use uuid::Uuid;

use aperture_artifact::{
    load_bundle, save_bundle, ArtifactError, ModelArtifactV1, ModelKindV1, ProvenanceV1,
    ScalerArtifactV1, ScalerKindV1, ARTIFACT_SCHEMA_VERSION, MODEL_FILE_NAME,
};
use aperture_model::{DesignParameters, FEATURE_NAMES, METRIC_NAMES};

fn test_scaler() -> ScalerArtifactV1 {
    ScalerArtifactV1 {
        schema_version: ARTIFACT_SCHEMA_VERSION.into(),
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        kind: ScalerKindV1::Standard {
            mean: vec![0.0; 7],
            scale: vec![1.0; 7],
        },
    }
}

fn test_model() -> ModelArtifactV1 {
    ModelArtifactV1 {
        schema_version: ARTIFACT_SCHEMA_VERSION.into(),
        num_features: 7,
        target_names: METRIC_NAMES.iter().map(|s| s.to_string()).collect(),
        provenance: ProvenanceV1 {
            run_id: Uuid::new_v4(),
            exported_by: "aperture-export (test)".into(),
        },
        // identity scaler + all-ones rows: every metric is the input sum
        kind: ModelKindV1::Linear {
            coefficients: vec![vec![1.0; 7]; 5],
            intercepts: vec![0.0; 5],
        },
    }
}

#[test]
fn bundle_roundtrip_and_predict() {
    let dir = Path::new("target/test_artifacts/roundtrip");
    let model = test_model();
    save_bundle(dir, &test_scaler(), &model).unwrap();

    let loaded = load_bundle(dir).unwrap();
    assert_eq!(loaded.provenance, model.provenance);

    let params = DesignParameters::from_vector([40.0, 30.0, 10.0, 2.0, 1.6, 4.4, 2.4]);
    let metrics = loaded.predictor.predict(&params).unwrap();
    for line in metrics.format_lines().lines() {
        assert!(line.ends_with(": 90.40"), "unexpected line: {line}");
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = Path::new("target/test_artifacts/missing");
    std::fs::create_dir_all(dir).unwrap();
    // only the scaler is present
    save_bundle(dir, &test_scaler(), &test_model()).unwrap();
    std::fs::remove_file(dir.join(MODEL_FILE_NAME)).unwrap();

    let err = load_bundle(dir).unwrap_err();
    assert!(matches!(err, ArtifactError::Read { .. }));
}

#[test]
fn corrupt_json_is_a_parse_error() {
    let dir = Path::new("target/test_artifacts/corrupt");
    save_bundle(dir, &test_scaler(), &test_model()).unwrap();
    std::fs::write(dir.join(MODEL_FILE_NAME), "{ not json").unwrap();

    let err = load_bundle(dir).unwrap_err();
    assert!(matches!(err, ArtifactError::Parse { .. }));
}

#[test]
fn stale_version_fails_at_load() {
    let dir = Path::new("target/test_artifacts/stale");
    let mut scaler = test_scaler();
    scaler.schema_version = "0.3".into();
    save_bundle(dir, &scaler, &test_model()).unwrap();

    let err = load_bundle(dir).unwrap_err();
    assert!(matches!(err, ArtifactError::SchemaVersion { .. }));
}

#[test]
fn forest_bundle_roundtrips() {
    use aperture_artifact::{TreeNodeV1, TreeV1};

    let dir = Path::new("target/test_artifacts/forest");
    let model = ModelArtifactV1 {
        kind: ModelKindV1::Forest {
            trees: vec![
                TreeV1 {
                    nodes: vec![
                        TreeNodeV1::Split {
                            feature: 0,
                            threshold: 0.0,
                            left: 1,
                            right: 2,
                        },
                        TreeNodeV1::Leaf { values: vec![1.0, 2.0, 3.0, 4.0, 5.0] },
                        TreeNodeV1::Leaf { values: vec![5.0, 4.0, 3.0, 2.0, 1.0] },
                    ],
                },
                TreeV1 {
                    nodes: vec![TreeNodeV1::Leaf { values: vec![3.0; 5] }],
                },
            ],
        },
        ..test_model()
    };
    save_bundle(dir, &test_scaler(), &model).unwrap();

    let loaded = load_bundle(dir).unwrap();
    // params sum is irrelevant here; patch length > 0 sends tree 1 right
    let params = DesignParameters::from_vector([40.0, 30.0, 10.0, 2.0, 1.6, 4.4, 2.4]);
    let metrics = loaded.predictor.predict(&params).unwrap();
    assert_eq!(metrics.to_vector(), [4.0, 3.5, 3.0, 2.5, 2.0]);
}
