//! Forecast clock and day-granularity date arithmetic.
//!
//! Every date in the forecast is a `NaiveDate`: an immutable value with no
//! time-of-day component, so "truncate to midnight" is implicit.

use crate::types::DayIndex;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Whole days from `a` to `b`; negative when `b` precedes `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

pub fn same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Date of the given day offset from `start`.
pub fn index_to_date(start: NaiveDate, day: DayIndex) -> NaiveDate {
    add_days(start, day as i64)
}

/// Day offset of `date` from `start`, or None if `date` precedes `start`.
pub fn date_to_index(start: NaiveDate, date: NaiveDate) -> Option<DayIndex> {
    usize::try_from(days_between(start, date)).ok()
}

/// Owns the day counter of one forecast run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastClock {
    pub start:       NaiveDate,
    /// Last day that has been stepped, None before day 0 runs.
    pub current_day: Option<DayIndex>,
    pub paused:      bool,
}

impl ForecastClock {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            start,
            current_day: None,
            paused: true,
        }
    }

    /// Clock positioned after `day`, ready to step `day + 1`.
    pub fn resume_after(start: NaiveDate, day: DayIndex) -> Self {
        Self {
            start,
            current_day: Some(day),
            paused: true,
        }
    }

    /// Advance one day. Returns the new day index.
    /// Panics if called while paused; callers must check.
    pub fn advance(&mut self) -> DayIndex {
        assert!(!self.paused, "advance() called on paused clock");
        let next = self.current_day.map_or(0, |d| d + 1);
        self.current_day = Some(next);
        next
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    pub fn today(&self) -> Option<NaiveDate> {
        self.current_day.map(|d| index_to_date(self.start, d))
    }

    pub fn date_of(&self, day: DayIndex) -> NaiveDate {
        index_to_date(self.start, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date(2016, 8, 15), date(2016, 9, 1)), 17);
        assert_eq!(days_between(date(2016, 9, 1), date(2016, 8, 15)), -17);
        assert_eq!(days_between(date(2016, 2, 28), date(2016, 3, 1)), 2);
    }

    #[test]
    fn add_days_round_trips_across_years() {
        let pairs = [
            (date(2016, 1, 1), date(2016, 12, 31)),
            (date(2020, 2, 29), date(2019, 3, 1)),
            (date(1999, 12, 31), date(2000, 1, 1)),
            (date(2017, 6, 6), date(2017, 6, 6)),
        ];
        for (d, e) in pairs {
            assert!(
                same_day(add_days(d, days_between(d, e)), e),
                "round trip failed for {d} -> {e}"
            );
        }
    }

    #[test]
    fn clock_counts_from_day_zero() {
        let mut clock = ForecastClock::new(date(2017, 1, 12));
        clock.resume();
        assert_eq!(clock.advance(), 0);
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.today(), Some(date(2017, 1, 13)));

        let mut resumed = ForecastClock::resume_after(date(2017, 1, 12), 5);
        resumed.resume();
        assert_eq!(resumed.advance(), 6);
        assert_eq!(date_to_index(resumed.start, date(2017, 1, 18)), Some(6));
        assert_eq!(date_to_index(resumed.start, date(2017, 1, 11)), None);
    }
}
