//! Goal-seeking and amortization math.
//!
//! Debt searches step payment by payment (not day by day): interest for
//! the days since the last payment is applied, then the payment. The
//! `days_before_first` offset covers accrual between the start of interest
//! and the first payment. Rates are annual; debts convert with 365.25
//! days per year, savings compound monthly on the 1st at rate / 12.
//!
//! "Never reached" is `None`, never an error. Every search stops at the
//! optional limit date and, regardless, after MAX_SEARCH_PERIODS steps.

use crate::{
    clock::days_between,
    ledger::Contribution,
    recurrence::{first_of_next_month, next_occurrence, Frequency},
    types::{DAYS_IN_YEAR, MONTHS_IN_YEAR},
};
use chrono::NaiveDate;

/// Hard bound on payment or contribution steps in any search.
pub const MAX_SEARCH_PERIODS: usize = 100_000;

const BISECTION_STEPS: usize = 100;

fn past_limit(date: NaiveDate, limit: Option<NaiveDate>) -> bool {
    limit.is_some_and(|limit| date > limit)
}

fn daily_factor(rate: f64) -> f64 {
    1.0 + rate / DAYS_IN_YEAR
}

fn compound(balance: f64, rate: f64, days: i64) -> f64 {
    balance * daily_factor(rate).powi(days as i32)
}

/// A fixed payment schedule run against a debt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentPlan {
    pub first_payment:     NaiveDate,
    pub days_before_first: i64,
    pub payment:           f64,
    pub frequency:         Frequency,
}

/// How a debt ends up retired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payoff {
    /// Date of the payment that brings the debt to zero.
    pub date:          NaiveDate,
    pub interest_paid: f64,
    pub payments:      usize,
}

/// Run `plan` against a debt compounding daily. None if the debt is
/// still outstanding when the next payment would fall past `limit`.
pub fn compound_payoff(plan: &PaymentPlan, debt: f64, rate: f64, limit: Option<NaiveDate>) -> Option<Payoff> {
    let mut balance = compound(debt, rate, plan.days_before_first);
    let mut interest_paid = balance - debt;
    balance -= plan.payment;

    let mut last = plan.first_payment;
    let mut payments = 1;
    while balance > 0.0 {
        let next = next_occurrence(last, plan.frequency)?;
        if past_limit(next, limit) || payments >= MAX_SEARCH_PERIODS {
            return None;
        }
        let grown = compound(balance, rate, days_between(last, next));
        interest_paid += grown - balance;
        balance = grown - plan.payment;
        last = next;
        payments += 1;
    }
    Some(Payoff { date: last, interest_paid, payments })
}

/// Run `plan` against a simple-interest loan: interest accrues on
/// principal only, and each payment retires accrued interest first.
pub fn simple_payoff(
    plan: &PaymentPlan,
    debt: f64,
    rate: f64,
    principal: f64,
    limit: Option<NaiveDate>,
) -> Option<Payoff> {
    let daily = rate / DAYS_IN_YEAR;
    let mut principal = principal;
    let mut interest = debt - principal;
    let mut interest_paid = 0.0;

    let mut pay = |principal: &mut f64, interest: &mut f64| {
        if plan.payment > *interest {
            interest_paid += *interest;
            *principal -= plan.payment - *interest;
            *interest = 0.0;
        } else {
            interest_paid += plan.payment;
            *interest -= plan.payment;
        }
    };

    interest += principal * daily * plan.days_before_first as f64;
    pay(&mut principal, &mut interest);

    let mut last = plan.first_payment;
    let mut payments = 1;
    while principal > 0.0 {
        let next = next_occurrence(last, plan.frequency)?;
        if past_limit(next, limit) || payments >= MAX_SEARCH_PERIODS {
            return None;
        }
        interest += principal * daily * days_between(last, next) as f64;
        pay(&mut principal, &mut interest);
        last = next;
        payments += 1;
    }
    Some(Payoff { date: last, interest_paid, payments })
}

pub fn find_goal_date_compound_interest(
    first_payment: NaiveDate,
    days_before_first: i64,
    payment: f64,
    frequency: Frequency,
    debt: f64,
    rate: f64,
    limit: Option<NaiveDate>,
) -> Option<NaiveDate> {
    let plan = PaymentPlan { first_payment, days_before_first, payment, frequency };
    compound_payoff(&plan, debt, rate, limit).map(|p| p.date)
}

pub fn find_compound_interest_paid(
    first_payment: NaiveDate,
    days_before_first: i64,
    payment: f64,
    frequency: Frequency,
    debt: f64,
    rate: f64,
    limit: Option<NaiveDate>,
) -> Option<f64> {
    let plan = PaymentPlan { first_payment, days_before_first, payment, frequency };
    compound_payoff(&plan, debt, rate, limit).map(|p| p.interest_paid)
}

#[allow(clippy::too_many_arguments)]
pub fn find_goal_date_simple_interest(
    first_payment: NaiveDate,
    days_before_first: i64,
    payment: f64,
    frequency: Frequency,
    debt: f64,
    rate: f64,
    principal: f64,
    limit: Option<NaiveDate>,
) -> Option<NaiveDate> {
    let plan = PaymentPlan { first_payment, days_before_first, payment, frequency };
    simple_payoff(&plan, debt, rate, principal, limit).map(|p| p.date)
}

#[allow(clippy::too_many_arguments)]
pub fn find_simple_interest_paid(
    first_payment: NaiveDate,
    days_before_first: i64,
    payment: f64,
    frequency: Frequency,
    debt: f64,
    rate: f64,
    principal: f64,
    limit: Option<NaiveDate>,
) -> Option<f64> {
    let plan = PaymentPlan { first_payment, days_before_first, payment, frequency };
    simple_payoff(&plan, debt, rate, principal, limit).map(|p| p.interest_paid)
}

/// Payment dates from `first` through `goal`, inclusive.
fn event_dates(first: NaiveDate, frequency: Frequency, goal: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = Some(first);
    while let Some(date) = current.filter(|d| *d <= goal) {
        if dates.len() >= MAX_SEARCH_PERIODS {
            break;
        }
        dates.push(date);
        current = next_occurrence(date, frequency);
    }
    dates
}

/// Fixed payment that retires a daily-compounding debt exactly on the
/// last payment on or before `goal_date`.
///
/// Solves `debt·c^(d0+T) = P·Σ c^(T - tₖ)` over payment offsets tₖ,
/// with c = 1 + rate/365.25.
pub fn find_payment_amount_compound_interest(
    first_payment: NaiveDate,
    days_before_first: i64,
    goal_date: NaiveDate,
    frequency: Frequency,
    debt: f64,
    rate: f64,
) -> Option<f64> {
    let dates = event_dates(first_payment, frequency, goal_date);
    let last = *dates.last()?;
    let c = daily_factor(rate);
    let total = days_between(first_payment, last);

    let top = debt * c.powi((days_before_first + total) as i32);
    let bottom: f64 = dates
        .iter()
        .map(|d| c.powi(days_between(*d, last) as i32))
        .sum();
    Some(top / bottom)
}

/// Fixed payment that retires a simple-interest loan by `goal_date`,
/// found by bisection on the payment amount.
#[allow(clippy::too_many_arguments)]
pub fn find_payment_amount_simple_interest(
    first_payment: NaiveDate,
    days_before_first: i64,
    goal_date: NaiveDate,
    frequency: Frequency,
    debt: f64,
    rate: f64,
    principal: f64,
) -> Option<f64> {
    if goal_date < first_payment {
        return None;
    }
    let accrued_up_front = (debt - principal) + principal * rate / DAYS_IN_YEAR * days_before_first as f64;
    let mut low = 0.0;
    let mut high = accrued_up_front + principal;

    for _ in 0..BISECTION_STEPS {
        let mid = (low + high) / 2.0;
        let plan = PaymentPlan { first_payment, days_before_first, payment: mid, frequency };
        if simple_payoff(&plan, debt, rate, principal, Some(goal_date)).is_some() {
            high = mid;
        } else {
            low = mid;
        }
    }
    Some(high)
}

// ── Savings ──────────────────────────────────────────────────────

/// Date of the contribution that first reaches `goal`, ignoring interest.
pub fn find_goal_date(
    next_contribution: NaiveDate,
    contribution: &Contribution,
    current: f64,
    goal: f64,
    limit: Option<NaiveDate>,
) -> Option<NaiveDate> {
    if !contribution.frequency.is_recurring() {
        return None;
    }
    let mut amount = current + contribution.amount;
    let mut date = next_contribution;
    let mut steps = 1;
    while amount < goal {
        date = next_occurrence(date, contribution.frequency)?;
        if past_limit(date, limit) || steps >= MAX_SEARCH_PERIODS {
            return None;
        }
        amount += contribution.amount;
        steps += 1;
    }
    Some(date)
}

/// Savings growth toward a goal, merging contributions with monthly
/// interest on the 1st. A contribution on an interest day lands first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsOutcome {
    /// Date the goal is first met; `start` if it already is.
    pub date:            NaiveDate,
    pub interest_earned: f64,
}

pub fn savings_growth(
    start: NaiveDate,
    next_contribution: NaiveDate,
    contribution: &Contribution,
    current: f64,
    goal: f64,
    rate: f64,
    limit: Option<NaiveDate>,
) -> Option<SavingsOutcome> {
    if !contribution.frequency.is_recurring() {
        return None;
    }
    let mut next_interest = first_of_next_month(start)?;
    let mut next_contribution = next_contribution;
    let mut amount = current;
    let mut outcome = SavingsOutcome { date: start, interest_earned: 0.0 };

    let mut steps = 0;
    while amount < goal {
        steps += 1;
        if steps > MAX_SEARCH_PERIODS {
            return None;
        }
        if next_interest < next_contribution {
            if past_limit(next_interest, limit) {
                return None;
            }
            let earned = amount * rate / MONTHS_IN_YEAR;
            amount += earned;
            outcome.interest_earned += earned;
            outcome.date = next_interest;
            next_interest = next_occurrence(next_interest, Frequency::Monthly)?;
        } else {
            if past_limit(next_contribution, limit) {
                return None;
            }
            amount += contribution.amount;
            outcome.date = next_contribution;
            next_contribution = next_occurrence(next_contribution, contribution.frequency)?;
        }
    }
    Some(outcome)
}

pub fn find_goal_date_with_interest(
    start: NaiveDate,
    next_contribution: NaiveDate,
    contribution: &Contribution,
    current: f64,
    goal: f64,
    rate: f64,
    limit: Option<NaiveDate>,
) -> Option<NaiveDate> {
    savings_growth(start, next_contribution, contribution, current, goal, rate, limit).map(|o| o.date)
}

pub fn find_interest_earned(
    start: NaiveDate,
    next_contribution: NaiveDate,
    contribution: &Contribution,
    current: f64,
    goal: f64,
    rate: f64,
    limit: Option<NaiveDate>,
) -> Option<f64> {
    savings_growth(start, next_contribution, contribution, current, goal, rate, limit).map(|o| o.interest_earned)
}

/// Balance on `goal_date` after contributions and monthly interest.
pub fn find_goal_amount(
    start: NaiveDate,
    next_contribution: NaiveDate,
    contribution: &Contribution,
    current: f64,
    rate: f64,
    goal_date: NaiveDate,
) -> f64 {
    let contributions = event_dates(next_contribution, contribution.frequency, goal_date);
    let interest_days = first_of_next_month(start)
        .map(|first| event_dates(first, Frequency::Monthly, goal_date))
        .unwrap_or_default();

    let mut amount = current;
    let mut pending = contributions.iter().peekable();
    for interest_day in &interest_days {
        while pending.next_if(|d| *d <= interest_day).is_some() {
            amount += contribution.amount;
        }
        amount *= 1.0 + rate / MONTHS_IN_YEAR;
    }
    amount + contribution.amount * pending.count() as f64
}

/// Contribution per period needed to reach `goal` on `goal_date`.
///
/// Counts contributions landing before each interest day nᵢ and solves
/// `goal = current·cᵐ + A·Σ nᵢ·c^(m-i)`, with c = 1 + rate/12.
pub fn find_contribution_amount(
    start: NaiveDate,
    next_contribution: NaiveDate,
    frequency: Frequency,
    current: f64,
    goal: f64,
    rate: f64,
    goal_date: NaiveDate,
) -> Option<f64> {
    let contributions = event_dates(next_contribution, frequency, goal_date);
    let interest_days = first_of_next_month(start)
        .map(|first| event_dates(first, Frequency::Monthly, goal_date))
        .unwrap_or_default();

    let mut per_window = Vec::with_capacity(interest_days.len() + 1);
    let mut pending = contributions.iter().peekable();
    for interest_day in &interest_days {
        let mut count = 0;
        while pending.next_if(|d| *d <= interest_day).is_some() {
            count += 1;
        }
        per_window.push(count);
    }
    per_window.push(pending.count());

    let c = 1.0 + rate / MONTHS_IN_YEAR;
    let m = interest_days.len() as i32;
    let top = goal - current * c.powi(m);
    let bottom: f64 = per_window
        .iter()
        .enumerate()
        .map(|(i, n)| *n as f64 * c.powi(m - i as i32))
        .sum();
    if bottom == 0.0 {
        return None;
    }
    Some(top / bottom)
}

// ── Frequency conversion ─────────────────────────────────────────

/// Convert a periodic amount between frequencies through its daily rate.
/// One-time amounts have no rate.
pub fn toggle(amount: f64, from: Frequency, to: Frequency) -> Option<f64> {
    let daily = match from {
        Frequency::OneTime  => return None,
        Frequency::Daily    => amount,
        Frequency::Weekly   => amount / 7.0,
        Frequency::BiWeekly => amount / 14.0,
        Frequency::Monthly  => amount * MONTHS_IN_YEAR / DAYS_IN_YEAR,
        Frequency::Yearly   => amount / DAYS_IN_YEAR,
    };
    let converted = match to {
        Frequency::OneTime  => return None,
        Frequency::Daily    => daily,
        Frequency::Weekly   => daily * 7.0,
        Frequency::BiWeekly => daily * 14.0,
        Frequency::Monthly  => daily * DAYS_IN_YEAR / MONTHS_IN_YEAR,
        Frequency::Yearly   => daily * DAYS_IN_YEAR,
    };
    Some(converted)
}
