//! Resolves dashboard periods into inclusive wall-clock windows.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use wise_domain::{end_of_day, start_of_day, PeriodWindow, Timeframe};

use crate::schedule::{shift_month, shift_year};

pub struct PeriodService;

impl PeriodService {
    /// Window for the period `offset` steps before the one containing
    /// `reference_now`. Offset 0 is the current period; negative offsets
    /// resolve future periods.
    ///
    /// Weeks run Sunday to Saturday. Windows start at 00:00:00.000 and end
    /// at 23:59:59.999 of their last day. Returns `None` when the period
    /// lies outside the representable calendar.
    pub fn resolve(
        timeframe: Timeframe,
        offset: i32,
        reference_now: NaiveDateTime,
    ) -> Option<PeriodWindow> {
        let today = reference_now.date();
        let back = i64::from(offset);
        let (first, last) = match timeframe {
            Timeframe::Daily => {
                let day = shift_days(today, -back)?;
                (day, day)
            }
            Timeframe::Weekly => {
                let sunday = today.checked_sub_days(Days::new(u64::from(
                    today.weekday().num_days_from_sunday(),
                )))?;
                let first = shift_days(sunday, back.checked_mul(-7)?)?;
                (first, first.checked_add_days(Days::new(6))?)
            }
            Timeframe::Monthly => {
                let first = shift_month(today.with_day(1)?, -back)?;
                (first, shift_month(first, 1)?.pred_opt()?)
            }
            Timeframe::Yearly => {
                let first = shift_year(today.with_ordinal(1)?, -back)?;
                (first, shift_year(first, 1)?.pred_opt()?)
            }
        };
        Some(PeriodWindow {
            timeframe,
            start: start_of_day(first),
            end: end_of_day(last),
            label: label_for(timeframe, first, last),
        })
    }

    /// The current period of `timeframe`.
    pub fn current(timeframe: Timeframe, reference_now: NaiveDateTime) -> Option<PeriodWindow> {
        Self::resolve(timeframe, 0, reference_now)
    }

    /// Up to `count` contiguous windows, oldest first, ending with the current
    /// period. Periods outside the representable calendar are left out.
    pub fn series(timeframe: Timeframe, count: usize, reference_now: NaiveDateTime) -> Vec<PeriodWindow> {
        (0..count)
            .rev()
            .filter_map(|offset| i32::try_from(offset).ok())
            .filter_map(|offset| Self::resolve(timeframe, offset, reference_now))
            .collect()
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    }
}

fn label_for(timeframe: Timeframe, first: NaiveDate, last: NaiveDate) -> String {
    match timeframe {
        Timeframe::Daily => first.format("%b %-d, %Y").to_string(),
        Timeframe::Weekly => format!("{} - {}", first.format("%b %-d"), last.format("%b %-d, %Y")),
        Timeframe::Monthly => first.format("%B %Y").to_string(),
        Timeframe::Yearly => first.format("%Y").to_string(),
    }
}
