use goecharger::config::{ClientConfig, Config};
use std::fs;
use std::time::Duration;

#[test]
fn save_and_load_yaml_roundtrip() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("config.yaml");

    let mut cfg = Config::default();
    cfg.charger = ClientConfig::new("http://10.0.0.5", "TOKEN")
        .with_wait(true)
        .with_verification(2, Duration::from_millis(250));
    cfg.logging.file = Some(path.with_extension("log").to_string_lossy().to_string());

    cfg.save_to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.charger.host, "http://10.0.0.5");
    assert!(loaded.charger.wait);
    assert_eq!(loaded.charger.verify_retries, 2);
    assert_eq!(loaded.charger.verify_delay(), Duration::from_millis(250));
    assert_eq!(loaded.logging.file, cfg.logging.file);
}

#[test]
fn partial_yaml_uses_defaults() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), b"charger:\n  host: http://charger\n  token: abc\n").unwrap();

    let cfg = Config::from_file(tmp.path()).unwrap();
    assert_eq!(cfg.charger.token, "abc");
    assert_eq!(cfg.charger.timeout(), Duration::from_secs(5));
    assert!(!cfg.charger.wait);
    assert_eq!(cfg.logging.level, "INFO");
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_validation_errors() {
    let valid = || {
        let mut cfg = Config::default();
        cfg.charger = ClientConfig::new("http://charger", "abc");
        cfg
    };
    assert!(valid().validate().is_ok());

    // Missing host
    let mut cfg = valid();
    cfg.charger.host.clear();
    assert!(cfg.validate().is_err());

    // Missing token
    cfg = valid();
    cfg.charger.token = "  ".to_string();
    assert!(cfg.validate().is_err());

    // Zero timeout
    cfg = valid();
    cfg.charger.timeout_ms = 0;
    assert!(cfg.validate().is_err());

    // Unknown log level
    cfg = valid();
    cfg.logging.level = "LOUD".to_string();
    assert!(cfg.validate().is_err());
}

#[test]
fn env_overrides_replace_file_values() {
    let mut cfg = Config::default();
    cfg.apply_overrides_from(|key| match key {
        "GOE_API_URL" => Some("http://override".to_string()),
        "GOE_API_TOKEN" => Some("secret".to_string()),
        "GOE_API_TIMEOUT_MS" => Some("750".to_string()),
        "GOE_API_WAIT" => Some("yes".to_string()),
        _ => None,
    });

    assert_eq!(cfg.charger.host, "http://override");
    assert_eq!(cfg.charger.token, "secret");
    assert_eq!(cfg.charger.timeout_ms, 750);
    assert!(cfg.charger.wait);
}

#[test]
fn from_file_with_invalid_yaml_fails() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), b"bad: [unclosed").unwrap();
    let err = Config::from_file(tmp.path()).unwrap_err();
    let msg = format!("{}", err);
    assert!(msg.contains("Serialization error"));
}
