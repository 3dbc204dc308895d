use std::path::PathBuf;

use tempfile::tempdir;
use wise_config::{Config, ConfigError, ConfigManager, Theme};

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.recent_limit, 5);
    assert_eq!(cfg.backup_retention, 5);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    assert!(manager.backups_dir().is_dir());
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let cfg = Config {
        currency: "EUR".into(),
        locale: "de-DE".into(),
        theme: Theme::Dark,
        data_root: Some(PathBuf::from("/srv/wise")),
        ..Config::default()
    };

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn backups_can_be_listed_and_restored() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let original = Config {
        currency: "JPY".into(),
        ..Config::default()
    };
    manager.save(&original).expect("save");
    let name = manager.backup(&original, Some("before travel")).expect("backup");
    assert!(name.ends_with("_before-travel.json"));
    assert_eq!(manager.list_backups().expect("list"), vec![name.clone()]);

    manager.save(&Config::default()).expect("overwrite");
    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.currency, "JPY");
    assert_eq!(manager.load().expect("load").currency, "JPY");

    assert!(matches!(
        manager.restore("config_missing.json"),
        Err(ConfigError::BackupNotFound(_))
    ));
}
