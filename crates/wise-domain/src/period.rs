//! Period granularities and inclusive aggregation windows.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Granularity of a dashboard or chart period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Daily,
        Timeframe::Weekly,
        Timeframe::Monthly,
        Timeframe::Yearly,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" | "today" => Some(Timeframe::Daily),
            "weekly" | "week" => Some(Timeframe::Weekly),
            "monthly" | "month" => Some(Timeframe::Monthly),
            "yearly" | "year" => Some(Timeframe::Yearly),
            _ => None,
        }
    }

    /// Short label used next to totals ("Today", "Week", ...).
    pub fn short_label(self) -> &'static str {
        match self {
            Timeframe::Daily => "Today",
            Timeframe::Weekly => "Week",
            Timeframe::Monthly => "Month",
            Timeframe::Yearly => "Year",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
            Timeframe::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

/// Inclusive `[start, end]` wall-clock range used for aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodWindow {
    pub timeframe: Timeframe,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl PeriodWindow {
    /// Full timestamp comparison, both bounds inclusive.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    pub fn overlaps(&self, other: &PeriodWindow) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
