use std::time::Duration;

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use moneywise_core::config::{Config, ConfigManager};
use moneywise_core::CoreError;
use moneywise_core::errors::ConfigError;
use tempfile::tempdir;

#[test]
fn load_returns_defaults_when_file_missing() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_path(dir.path().join("config.json"));
    let config = manager.load().expect("load defaults");
    assert_eq!(config, Config::default());
    assert_eq!(config.currency_symbol, "₹");
    assert_eq!(config.basic_expense_category, "Basic Expenses");
}

#[test]
fn save_then_load_preserves_settings() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_path(dir.path().join("nested").join("config.json"));
    let config = Config {
        currency_symbol: "€".into(),
        notifier_timeout_secs: 4,
        monthly_income: Some(3200.0),
        ..Config::default()
    };
    manager.save(&config).expect("save config");
    assert!(manager.path().exists());
    assert!(!manager.path().with_extension("json.tmp").exists());

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, config);

    let settings = loaded.scheduler_settings();
    assert_eq!(settings.currency_symbol, "€");
    assert_eq!(settings.channel, "bills-reminders");
    assert_eq!(settings.notifier_timeout, Duration::from_secs(4));
}

#[test]
fn malformed_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write file");
    let err = ConfigManager::with_path(path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn new_bill_falls_back_to_configured_lead_time() {
    let now = Utc.with_ymd_and_hms(2025, 10, 1, 8, 0, 0).unwrap();
    let due = now + ChronoDuration::days(7);
    let config = Config {
        default_reminder_days: 3,
        ..Config::default()
    };

    let defaulted = config.new_bill("Rent", 900.0, due, None, now).expect("valid bill");
    assert_eq!(defaulted.reminder_days_before, 3);
    assert_eq!(defaulted.reminder_at(), Some(due - ChronoDuration::days(3)));

    let explicit = config.new_bill("Rent", 900.0, due, Some(0), now).expect("valid bill");
    assert_eq!(explicit.reminder_days_before, 0);

    let err = config.new_bill(" ", 900.0, due, None, now).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}
