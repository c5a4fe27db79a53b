//! Environment overrides live in their own test binary so no other test
//! observes the mutated process environment.

use std::io::Write;

use tempfile::NamedTempFile;
use zenb_vitals::{ConfigError, EstimatorKind, VitalsConfig};

#[test]
fn env_overrides_apply_over_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "sampling_rate_hz = 30.0\nwindow_seconds = 6.0").unwrap();

    std::env::set_var("ZENB_VITALS_ESTIMATOR", "spectral");
    std::env::set_var("ZENB_VITALS_SUBJECT_AGE", "45");
    std::env::set_var("ZENB_VITALS_RNG_SEED", "1234");
    let config = VitalsConfig::from_file_with_env(file.path()).unwrap();
    assert_eq!(config.estimator, EstimatorKind::Spectral);
    assert_eq!(config.subject.age, 45);
    assert_eq!(config.rng_seed, Some(1234));

    std::env::set_var("ZENB_VITALS_SAMPLING_RATE_HZ", "not-a-number");
    let err = VitalsConfig::from_file_with_env(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));

    // overrides are validated like file values: 4 Hz puts the band above Nyquist
    std::env::set_var("ZENB_VITALS_SAMPLING_RATE_HZ", "4");
    assert!(VitalsConfig::from_file_with_env(file.path()).is_err());

    for key in [
        "ZENB_VITALS_ESTIMATOR",
        "ZENB_VITALS_SUBJECT_AGE",
        "ZENB_VITALS_RNG_SEED",
        "ZENB_VITALS_SAMPLING_RATE_HZ",
    ] {
        std::env::remove_var(key);
    }
}
