//! Calendar arithmetic for recurrence pointers.
//!
//! Month and year steps clamp to the last day of the target month when the
//! anchor day does not exist there (Jan 31 -> Feb 29 in a leap year, Feb 29 ->
//! Feb 28 of the next year). Each step starts from the current pointer, so a
//! clamped day is carried forward. Time of day is preserved.

use chrono::{Days, Months, NaiveDate, NaiveDateTime};

use wise_domain::Frequency;

/// Returns the occurrence that follows `date` for the given frequency.
///
/// `Frequency::None` advances by one day so a malformed definition still
/// moves forward. The result is strictly later than `date`, or `None` when it
/// would fall outside the representable calendar.
pub fn advance(date: NaiveDateTime, frequency: Frequency) -> Option<NaiveDateTime> {
    match frequency {
        Frequency::Daily | Frequency::None => date.checked_add_days(Days::new(1)),
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Monthly => Some(shift_month(date.date(), 1)?.and_time(date.time())),
        Frequency::Yearly => Some(shift_year(date.date(), 1)?.and_time(date.time())),
    }
}

/// Moves `date` by `months` calendar months, clamping the day of month.
pub fn shift_month(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    }
}

/// Moves `date` by `years` calendar years, clamping Feb 29.
pub fn shift_year(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    shift_month(date, years.checked_mul(12)?)
}
