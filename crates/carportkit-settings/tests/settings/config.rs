use carportkit_settings::{Config, ConfigError, SettingsError};
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    let mut config = Config::new();
    config.interaction.grid_size = 0.25;
    config.share.base_url = "https://carports.example/configurator".to_string();
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let mut config = Config::new();
    config.storage.namespace_key = "carport-test".to_string();
    config.save_to_file(&path).unwrap();

    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.yaml");
    assert!(matches!(
        Config::new().save_to_file(&path),
        Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_invalid_file_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[interaction]\ngrid_size = -1.0\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::Config(ConfigError::ValueOutOfRange { .. }))
    ));

    std::fs::write(&path, "interaction = 3").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());

    Config::default().save_to_file(&path).unwrap();
    assert!(path.exists());
}
