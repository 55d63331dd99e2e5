use nova_config::{ConfigError, LoggingConfig, NovaConfig, ResolutionConfig};
use tempfile::tempdir;

#[test]
fn empty_config_uses_defaults() {
    let config = NovaConfig::from_toml_str("").expect("empty config should parse");
    assert_eq!(config, NovaConfig::default());
    assert_eq!(config.resolution.object_type, "java.lang.Object");
    assert_eq!(config.resolution.record_base_type, "java.lang.Record");
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = NovaConfig::from_toml_str(
        r#"
[logging]
level = "debug"

[resolution]
record_base_type = "compat.Record"
"#,
    )
    .expect("config should parse");

    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.resolution,
        ResolutionConfig {
            record_base_type: "compat.Record".to_owned(),
            ..ResolutionConfig::default()
        }
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = NovaConfig::from_toml_str("[resolution]\nrecord_type = \"x\"\n")
        .expect_err("unknown key must fail");
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
}

#[test]
fn load_from_path_reads_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nova.toml");
    std::fs::write(&path, "[logging]\njson = true\n").unwrap();

    let config = NovaConfig::load_from_path(&path).expect("config should load");
    assert_eq!(
        config.logging,
        LoggingConfig {
            json: true,
            ..LoggingConfig::default()
        }
    );
}

#[test]
fn load_from_missing_path_reports_io_error() {
    let dir = tempdir().unwrap();
    let err = NovaConfig::load_from_path(dir.path().join("missing.toml"))
        .expect_err("missing file must fail");
    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("missing.toml")),
        other => panic!("expected io error, got {other:?}"),
    }
}
