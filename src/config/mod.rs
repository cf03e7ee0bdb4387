use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, CoreResult};
use crate::ledger::Bill;
use crate::reminders::scheduler::{
    SchedulerSettings, DEFAULT_CHANNEL, DEFAULT_CURRENCY_SYMBOL, DEFAULT_NOTIFIER_TIMEOUT,
};

const APP_DIR: &str = "moneywise";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// User preferences that shape reports and reminders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_reminder_channel")]
    pub reminder_channel: String,
    #[serde(default = "Config::default_notifier_timeout_secs")]
    pub notifier_timeout_secs: u64,
    #[serde(default = "Config::default_reminder_days")]
    pub default_reminder_days: u32,
    #[serde(default = "Config::default_basic_expense_category")]
    pub basic_expense_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            reminder_channel: Self::default_reminder_channel(),
            notifier_timeout_secs: Self::default_notifier_timeout_secs(),
            default_reminder_days: Self::default_reminder_days(),
            basic_expense_category: Self::default_basic_expense_category(),
            monthly_income: None,
        }
    }
}

impl Config {
    fn default_currency_symbol() -> String {
        DEFAULT_CURRENCY_SYMBOL.into()
    }

    fn default_reminder_channel() -> String {
        DEFAULT_CHANNEL.into()
    }

    fn default_notifier_timeout_secs() -> u64 {
        DEFAULT_NOTIFIER_TIMEOUT.as_secs()
    }

    fn default_reminder_days() -> u32 {
        1
    }

    fn default_basic_expense_category() -> String {
        "Basic Expenses".into()
    }

    /// Creates a bill, using `default_reminder_days` when no lead time is given.
    pub fn new_bill(
        &self,
        name: &str,
        amount: f64,
        due_at: DateTime<Utc>,
        reminder_days_before: Option<u32>,
        now: DateTime<Utc>,
    ) -> CoreResult<Bill> {
        let lead = reminder_days_before.unwrap_or(self.default_reminder_days);
        Bill::new(name, amount, due_at, lead, now)
    }

    pub fn scheduler_settings(&self) -> SchedulerSettings {
        SchedulerSettings {
            channel: self.reminder_channel.clone(),
            currency_symbol: self.currency_symbol.clone(),
            notifier_timeout: Duration::from_secs(self.notifier_timeout_secs.max(1)),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `<config dir>/moneywise/config.json`, falling back to the working
    /// directory when the platform has no config dir.
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_path(base.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_synced(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_synced(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
