use motionkit_settings::{Config, MachineSettings, SettingsManager, SettingsStore};
use tempfile::tempdir;

#[test]
fn test_stored_setting_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("machine.toml");

    let mut manager = SettingsManager::open(&path, MachineSettings::new(), Vec::new()).unwrap();
    manager.store_setting(6, 0.25).unwrap();
    manager.store_setting(0, 94.488).unwrap();
    assert!(path.exists());

    let reopened = SettingsManager::open(&path, MachineSettings::new(), Vec::new()).unwrap();
    assert_eq!(reopened.settings().mm_per_arc_segment, 0.25);
    assert_eq!(reopened.settings().steps_per_mm[0], 94.488);
}

#[test]
fn test_open_missing_file_uses_fallback() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("machine.json");

    let mut fallback = MachineSettings::new();
    fallback.default_seek_rate = 1200.0;

    let mut manager = SettingsManager::open(&path, fallback.clone(), Vec::new()).unwrap();
    assert_eq!(manager.settings(), &fallback);
    assert!(!path.exists());

    manager.store_setting(5, 1500.0).unwrap();
    assert!(path.exists());
}

#[test]
fn test_rejected_setting_is_not_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("machine.json");

    let mut manager = SettingsManager::open(&path, MachineSettings::new(), Vec::new()).unwrap();
    assert!(manager.store_setting(4, -10.0).is_err());
    assert!(!path.exists());
}

#[test]
fn test_config_round_trip_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::new();
    config.machine.default_feed_rate = 300.0;
    config.settings_file = Some(dir.path().join("machine.toml"));
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_round_trip_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = Config::new();
    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_config_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.ini");
    assert!(Config::new().save_to_file(&path).is_err());
}

#[test]
fn test_config_load_rejects_invalid_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "mm_per_inch = -1.0\n").unwrap();
    assert!(Config::load_from_file(&path).is_err());
}
