use serde::{de::Deserializer, Deserialize, Serialize};
use std::{fmt, path::PathBuf};

use wise_domain::Timeframe;

pub const DATA_DIR_NAME: &str = "budget_wise";

/// User preferences shared by every Budget Wise front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Dashboard granularity: `daily`, `weekly`, `monthly` or `yearly`.
    #[serde(default = "Config::default_timeframe_value")]
    pub default_timeframe: String,
    #[serde(default = "Config::default_trend_periods")]
    pub trend_periods: usize,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the ledger document. Defaults to the platform data dir.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            theme: Theme::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_timeframe: Self::default_timeframe_value(),
            trend_periods: Self::default_trend_periods(),
            recent_limit: Self::default_recent_limit(),
            backup_retention: Self::default_backup_retention(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_timeframe_value() -> String {
        "monthly".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_trend_periods() -> usize {
        13
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    /// Parsed dashboard timeframe; unknown labels fall back to monthly.
    pub fn timeframe(&self) -> Timeframe {
        Timeframe::parse(&self.default_timeframe).unwrap_or_default()
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(DATA_DIR_NAME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| Theme::from_str(v.trim()))
            .unwrap_or_default()
    }

    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Theme::Dark,
            "system" => Theme::System,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Theme::from_value(value))
    }
}
