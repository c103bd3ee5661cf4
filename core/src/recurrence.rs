//! The one recurrence advancer every schedule in the ledger goes through.

use crate::clock::add_days;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    OneTime,
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const RECURRING: [Frequency; 5] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn is_recurring(self) -> bool {
        self != Frequency::OneTime
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::OneTime  => "one-time",
            Frequency::Daily    => "daily",
            Frequency::Weekly   => "weekly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::Monthly  => "monthly",
            Frequency::Yearly   => "yearly",
        };
        f.write_str(label)
    }
}

/// Next occurrence after `date`. One-time schedules have none.
///
/// Monthly and yearly steps keep the day of month, clamped to the last day
/// of the destination month (Jan 31 -> Feb 28, Feb 29 -> Feb 28).
pub fn next_occurrence(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::OneTime  => None,
        Frequency::Daily    => Some(add_days(date, 1)),
        Frequency::Weekly   => Some(add_days(date, 7)),
        Frequency::BiWeekly => Some(add_days(date, 14)),
        Frequency::Monthly  => date.checked_add_months(Months::new(1)),
        Frequency::Yearly   => date.checked_add_months(Months::new(12)),
    }
}

/// The occurrence one period before `date`, with the same clamping rules.
pub fn previous_occurrence(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::OneTime  => None,
        Frequency::Daily    => Some(add_days(date, -1)),
        Frequency::Weekly   => Some(add_days(date, -7)),
        Frequency::BiWeekly => Some(add_days(date, -14)),
        Frequency::Monthly  => date.checked_sub_months(Months::new(1)),
        Frequency::Yearly   => date.checked_sub_months(Months::new(12)),
    }
}

/// First day of the month following `date`.
pub fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day0(0)?.checked_add_months(Months::new(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_steps() {
        let d = date(2016, 9, 28);
        assert_eq!(next_occurrence(d, Frequency::Daily), Some(date(2016, 9, 29)));
        assert_eq!(next_occurrence(d, Frequency::Weekly), Some(date(2016, 10, 5)));
        assert_eq!(next_occurrence(d, Frequency::BiWeekly), Some(date(2016, 10, 12)));
        assert_eq!(next_occurrence(d, Frequency::OneTime), None);
    }

    #[test]
    fn monthly_clamps_to_short_months() {
        assert_eq!(next_occurrence(date(2017, 1, 31), Frequency::Monthly), Some(date(2017, 2, 28)));
        assert_eq!(next_occurrence(date(2016, 1, 31), Frequency::Monthly), Some(date(2016, 2, 29)));
        assert_eq!(next_occurrence(date(2016, 2, 29), Frequency::Yearly), Some(date(2017, 2, 28)));
        assert_eq!(previous_occurrence(date(2017, 3, 31), Frequency::Monthly), Some(date(2017, 2, 28)));
    }

    #[test]
    fn first_of_next_month_rolls_the_year() {
        assert_eq!(first_of_next_month(date(2016, 12, 15)), Some(date(2017, 1, 1)));
        assert_eq!(first_of_next_month(date(2017, 1, 1)), Some(date(2017, 2, 1)));
    }
}
