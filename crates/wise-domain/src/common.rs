//! Shared enums and wall-clock helpers for ledger primitives.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use serde::{de::Deserializer, Deserialize, Serialize};

/// Direction of money movement. The amount itself is always positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn is_income(self) -> bool {
        matches!(self, TransactionType::Income)
    }

    /// Parses user input, returning `None` for unknown labels.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Recurrence cadence for a recurring definition.
///
/// `None` is a sentinel meaning "not recurring". Stored values that are
/// missing or unrecognised deserialize to `None` and are advanced with the
/// daily fallback so a malformed definition still makes forward progress.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum Frequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const RECURRING: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn is_recurring(self) -> bool {
        !matches!(self, Frequency::None)
    }

    /// Parses user or persisted input, returning `None` for unknown labels.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Frequency::None),
            "daily" | "day" => Some(Frequency::Daily),
            "weekly" | "week" => Some(Frequency::Weekly),
            "monthly" | "month" => Some(Frequency::Monthly),
            "yearly" | "year" | "annual" => Some(Frequency::Yearly),
            _ => None,
        }
    }

    fn from_value(value: Option<String>) -> Self {
        match value {
            Some(raw) => Frequency::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown recurrence frequency; using daily fallback");
                Frequency::None
            }),
            None => Frequency::None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::None => "None",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Frequency::from_value(value))
    }
}

/// First instant of `date` (00:00:00.000).
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last millisecond of `date` (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

/// Drops sub-millisecond precision.
///
/// Stored timestamps and window bounds have millisecond resolution, so every
/// timestamp entering the ledger goes through here first.
pub fn truncate_to_millis(value: NaiveDateTime) -> NaiveDateTime {
    value.trunc_subsecs(3)
}

/// Serde adapter for wall-clock ISO 8601 timestamps.
///
/// Writes `YYYY-MM-DDTHH:MM:SS.mmm`. Reads that form, RFC 3339 values with an
/// offset (converted to local wall-clock time, the frame the clock and period
/// windows use) and bare `YYYY-MM-DD` dates (midnight). Parsed values are
/// truncated to milliseconds.
pub mod iso_timestamp {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::{start_of_day, truncate_to_millis};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
    }

    /// Parses any of the accepted timestamp forms.
    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let value = raw.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
            return Some(truncate_to_millis(with_offset.with_timezone(&Local).naive_local()));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(truncate_to_millis(naive));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .map(start_of_day)
    }
}
