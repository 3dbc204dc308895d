use chrono::{NaiveDate, NaiveDateTime};

/// Clock abstracts access to the current wall-clock time so the host can pin "now" in tests.
///
/// Engine functions never consult a clock; only the host session does.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current calendar date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
