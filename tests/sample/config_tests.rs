// Tests for configuration handling

use std::path::PathBuf;

use tempfile::TempDir;

use hash_sample::sample::config::{default_seed_phrase, DEFAULT_COUNT, DEFAULT_SIZE};
use hash_sample::sample::{ConfigFile, PlanMode, SampleConfig, SampleError};

use super::write_file;

#[test]
fn test_defaults() {
    let config = SampleConfig::default();
    assert_eq!(config.algorithm, "md5");
    assert_eq!(config.size_spec, DEFAULT_SIZE);
    assert_eq!(config.sample_count, DEFAULT_COUNT);
    assert!(config.verbose);
    assert!(!config.uniform);
    assert!(config.files.is_empty());
}

#[test]
fn test_default_phrase_is_a_date() {
    let phrase = default_seed_phrase();
    assert_eq!(phrase.len(), 10);
    assert!(chrono::NaiveDate::parse_from_str(&phrase, "%Y-%m-%d").is_ok());
}

#[test]
fn test_mode_follows_uniform_flag() {
    let mut config = SampleConfig {
        seed_phrase: "abc".to_string(),
        ..SampleConfig::default()
    };
    assert_eq!(config.mode(), PlanMode::Seeded("abc".to_string()));
    config.uniform = true;
    assert_eq!(config.mode(), PlanMode::Uniform);
}

#[test]
fn test_validate() {
    let valid = SampleConfig {
        files: vec![PathBuf::from("a.bin")],
        ..SampleConfig::default()
    };
    assert!(valid.validate().is_ok());

    let no_files = SampleConfig::default();
    assert!(matches!(no_files.validate(), Err(SampleError::Config { .. })));

    let bad_count = SampleConfig {
        sample_count: 1,
        ..valid.clone()
    };
    assert!(matches!(
        bad_count.validate(),
        Err(SampleError::InvalidSampleCount { count: 1 })
    ));

    let bad_algorithm = SampleConfig {
        algorithm: "rot13".to_string(),
        ..valid.clone()
    };
    assert!(matches!(
        bad_algorithm.validate(),
        Err(SampleError::UnsupportedAlgorithm { .. })
    ));

    let bad_size = SampleConfig {
        size_spec: "12parsecs".to_string(),
        ..valid
    };
    assert!(matches!(
        bad_size.validate(),
        Err(SampleError::InvalidSizeSpec { .. })
    ));
}

#[test]
fn test_parse_config_file() {
    let file = ConfigFile::parse(
        r#"
algorithm = "sha256"
size = "4MiB"
count = 32
phrase = "nightly"
parallel = true
"#,
    )
    .unwrap();

    assert_eq!(file.algorithm.as_deref(), Some("sha256"));
    assert_eq!(file.size.as_deref(), Some("4MiB"));
    assert_eq!(file.count, Some(32));
    assert_eq!(file.phrase.as_deref(), Some("nightly"));
    assert_eq!(file.uniform, None);
    assert_eq!(file.parallel, Some(true));
}

#[test]
fn test_empty_config_file_is_all_defaults() {
    assert_eq!(ConfigFile::parse("").unwrap(), ConfigFile::default());
}

#[test]
fn test_unknown_keys_are_rejected() {
    let result = ConfigFile::parse("algo = \"md5\"\n");
    assert!(matches!(result, Err(SampleError::Config { .. })));
}

#[test]
fn test_apply_only_overrides_present_values() {
    let file = ConfigFile {
        count: Some(20),
        uniform: Some(true),
        ..ConfigFile::default()
    };
    let mut config = SampleConfig::default();
    file.apply(&mut config);

    assert_eq!(config.sample_count, 20);
    assert!(config.uniform);
    assert_eq!(config.algorithm, "md5");
    assert_eq!(config.size_spec, "1%");
}

#[test]
fn test_load_reports_path_on_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "config.toml", b"count = \"many\"\n");

    match ConfigFile::load(&path) {
        Err(SampleError::Config { message }) => {
            assert!(message.contains("config.toml"), "{}", message)
        }
        other => panic!("Expected Config error, got {:?}", other),
    }

    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        ConfigFile::load(&missing),
        Err(SampleError::Config { .. })
    ));
}

#[test]
fn test_load_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "config.toml", b"algorithm = \"blake3\"\nuniform = true\n");
    let file = ConfigFile::load(&path).unwrap();
    assert_eq!(file.algorithm.as_deref(), Some("blake3"));
    assert_eq!(file.uniform, Some(true));
}
