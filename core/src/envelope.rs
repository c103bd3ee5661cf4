//! Envelope reset engine: when budget items reset and how much they take.
//!
//! Weekly items reset on the budget's reset weekday, monthly items on its
//! reset day of month (clamped to short months). Everything else follows
//! the ordinary recurrence.

use crate::{
    clock::{add_days, days_between},
    ledger::Budget,
    recurrence::{next_occurrence, Frequency},
};
use chrono::{Datelike, Months, NaiveDate};

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = first.checked_add_months(Months::new(1))?;
    Some(add_days(next_first, -1).day())
}

/// The reset day inside the given month, clamped to the month's length.
fn reset_in_month(year: i32, month: u32, reset_day: u32) -> Option<NaiveDate> {
    let day = reset_day.clamp(1, last_day_of_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn shift_month(date: NaiveDate, forward: bool) -> Option<NaiveDate> {
    let first = date.with_day(1)?;
    if forward {
        first.checked_add_months(Months::new(1))
    } else {
        first.checked_sub_months(Months::new(1))
    }
}

/// Next reset after `last_reset` for an item of the given frequency.
pub fn next_reset(budget: &Budget, frequency: Frequency, last_reset: NaiveDate) -> Option<NaiveDate> {
    match frequency {
        Frequency::Weekly => {
            let target = i64::from(budget.weekly_reset.num_days_from_sunday());
            let today = i64::from(last_reset.weekday().num_days_from_sunday());
            let ahead = match (target - today).rem_euclid(7) {
                0 => 7,
                n => n,
            };
            Some(add_days(last_reset, ahead))
        }
        Frequency::Monthly => {
            let this_month = reset_in_month(last_reset.year(), last_reset.month(), budget.monthly_reset)?;
            if last_reset < this_month {
                Some(this_month)
            } else {
                let next = shift_month(last_reset, true)?;
                reset_in_month(next.year(), next.month(), budget.monthly_reset)
            }
        }
        _ => next_occurrence(last_reset, frequency),
    }
}

/// Reset that opened the period `next` closes.
///
/// Monthly periods start on the previous month's clamped reset day, so a
/// day-31 budget resetting on Feb 28 looks back to Jan 31, not Jan 28.
fn previous_reset(budget: &Budget, frequency: Frequency, next: NaiveDate) -> Option<NaiveDate> {
    match frequency {
        Frequency::Weekly  => Some(add_days(next, -7)),
        Frequency::Monthly => {
            let prev = shift_month(next, false)?;
            reset_in_month(prev.year(), prev.month(), budget.monthly_reset)
        }
        Frequency::Yearly  => next.checked_sub_months(Months::new(12)),
        _ => None,
    }
}

/// Share of `amount` covering the days from `current_loss` up to the next
/// reset, out of the whole period. Frequencies without a period return
/// the full amount.
///
/// Yearly items reset on their own anniversary, so their period always
/// begins on the loss day and the full amount is taken.
pub fn prorate(budget: &Budget, frequency: Frequency, amount: f64, current_loss: NaiveDate) -> f64 {
    let fraction = || -> Option<f64> {
        let next = next_reset(budget, frequency, current_loss)?;
        let previous = previous_reset(budget, frequency, next)?;
        let total = days_between(previous, next);
        if total <= 0 {
            return None;
        }
        Some(days_between(current_loss, next) as f64 / total as f64)
    };
    fraction().map_or(amount, |f| amount * f)
}
