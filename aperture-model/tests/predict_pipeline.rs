use aperture_model::{
    DesignParameters, InputError, LinearModel, Predictor, RegressionModel, Scaler, METRIC_COUNT,
    PARAM_COUNT,
};

#[test]
fn form_text_to_formatted_metrics() {
    let predictor = Predictor::new(
        Scaler::identity(PARAM_COUNT),
        RegressionModel::Linear(LinearModel::sum_of_inputs(PARAM_COUNT, METRIC_COUNT)),
    );

    let params =
        DesignParameters::parse(["40.0", "30.0", "10.0", "2.0", "1.6", "4.4", "2.4"]).unwrap();
    let metrics = predictor.predict(&params).unwrap();

    assert_eq!(
        metrics.format_lines(),
        "Gain_dB: 90.40\n\
         Directivity: 90.40\n\
         S11_dB: 90.40\n\
         Bandwidth_MHz: 90.40\n\
         Radiation_Efficiency: 90.40"
    );
}

#[test]
fn fitted_scaler_changes_the_prediction_deterministically() {
    let scaled = Predictor::new(
        Scaler::Standard {
            mean: vec![32.5, 24.0, 9.5, 1.8, 1.52, 3.8, 3.1],
            scale: vec![8.2, 6.4, 3.1, 0.7, 0.42, 1.1, 1.3],
        },
        RegressionModel::Linear(LinearModel::sum_of_inputs(PARAM_COUNT, METRIC_COUNT)),
    );

    let params =
        DesignParameters::parse(["40.0", "30.0", "10.0", "2.0", "1.6", "4.4", "2.4"]).unwrap();
    let a = scaled.predict(&params).unwrap();
    let b = scaled.predict(&params).unwrap();
    assert_eq!(a, b);

    // All five outputs are finite and equal to the sum of the scaled features.
    let identity = Predictor::new(
        Scaler::identity(PARAM_COUNT),
        RegressionModel::Linear(LinearModel::sum_of_inputs(PARAM_COUNT, METRIC_COUNT)),
    );
    assert_ne!(a, identity.predict(&params).unwrap());
    for (_, value) in a.named_values() {
        assert!(value.is_finite());
    }
}

#[test]
fn bad_field_text_never_reaches_the_pipeline() {
    let err = DesignParameters::parse(["40.0", "30.0", "10.0", "2.0", "1.6", "4.4", "2.4 GHz"])
        .unwrap_err();
    assert!(matches!(err, InputError::NotANumber { .. }));
    assert!(err.to_string().contains("Frequency (GHz)"));
}
