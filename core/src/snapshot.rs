//! Snapshot rows: one record per entity per simulated day.
//!
//! Row `i` is always created by carrying row `i - 1` forward before any
//! handler touches day `i`; row 0 is seeded from the live entity.
//! Rows live in a `DayRows` arena indexed by day offset, pre-sized to the
//! run's horizon. Days are contiguous from 0.

use crate::{
    clock::add_days,
    error::{ForecastError, ForecastResult},
    event::TransactionRecord,
    ledger::{Account, BudgetItem, Debt, Scheduled},
    recurrence::first_of_next_month,
    types::DayIndex,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Builds the next day's row from this one: same carry-over fields,
/// date advanced one day, nothing logged yet.
pub trait CarryForward {
    fn carry_forward(&self) -> Self;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRow {
    pub date:              NaiveDate,
    pub value:             f64,
    pub next_contribution: Option<NaiveDate>,
    /// Savings accounts only: the 1st of the next accrual month.
    pub next_interest:     Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history:           Vec<TransactionRecord>,
}

impl AccountRow {
    pub fn seed(account: &Account, start: NaiveDate) -> Self {
        let savings = account.savings_terms();
        Self {
            date:              start,
            value:             account.value,
            next_contribution: savings.and_then(|s| s.next_contribution),
            next_interest:     savings.and_then(|_| first_of_next_month(start)),
            history:           Vec::new(),
        }
    }
}

impl CarryForward for AccountRow {
    fn carry_forward(&self) -> Self {
        Self {
            date:              add_days(self.date, 1),
            value:             self.value,
            next_contribution: self.next_contribution,
            next_interest:     self.next_interest,
            history:           Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRow {
    pub date:          NaiveDate,
    pub value:         f64,
    pub next_payment:  Option<NaiveDate>,
    /// Debts accrue daily, starting the day after the run starts.
    pub next_interest: NaiveDate,
    pub principal:     f64,
    pub interest:      f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history:       Vec<TransactionRecord>,
}

impl DebtRow {
    pub fn seed(debt: &Debt, start: NaiveDate) -> Self {
        let (principal, interest) = match debt.simple_interest_terms() {
            Some(terms) => (terms.principal, terms.interest),
            None        => (debt.amount, 0.0),
        };
        Self {
            date:          start,
            value:         debt.amount,
            next_payment:  debt.payment.as_ref().and_then(|p| p.next_payment),
            next_interest: add_days(start, 1),
            principal,
            interest,
            history:       Vec::new(),
        }
    }
}

impl CarryForward for DebtRow {
    fn carry_forward(&self) -> Self {
        Self {
            date:          add_days(self.date, 1),
            value:         self.value,
            next_payment:  self.next_payment,
            next_interest: self.next_interest,
            principal:     self.principal,
            interest:      self.interest,
            history:       Vec::new(),
        }
    }
}

/// Row for gains, expenses and transfers: only the schedule moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date:      NaiveDate,
    pub next_date: Option<NaiveDate>,
}

impl ScheduleRow {
    pub fn seed(entity: &impl Scheduled, start: NaiveDate) -> Self {
        Self { date: start, next_date: entity.next_date() }
    }
}

impl CarryForward for ScheduleRow {
    fn carry_forward(&self) -> Self {
        Self { date: add_days(self.date, 1), next_date: self.next_date }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeRow {
    pub date:               NaiveDate,
    pub next_reset:         Option<NaiveDate>,
    /// Remainder at the start of the day.
    pub original_remaining: f64,
    /// Remainder after today's reset, if any.
    pub updated_remaining:  f64,
    pub loss_today:         Option<f64>,
}

impl EnvelopeRow {
    pub fn seed(item: &BudgetItem, start: NaiveDate) -> Self {
        Self {
            date:               start,
            next_reset:         item.next_loss,
            original_remaining: item.current_amount,
            updated_remaining:  item.current_amount,
            loss_today:         None,
        }
    }
}

impl CarryForward for EnvelopeRow {
    fn carry_forward(&self) -> Self {
        Self {
            date:               add_days(self.date, 1),
            next_reset:         self.next_reset,
            original_remaining: self.updated_remaining,
            updated_remaining:  self.updated_remaining,
            loss_today:         None,
        }
    }
}

// ── Arena ────────────────────────────────────────────────────────

/// Rows of one entity, indexed by day offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayRows<R> {
    rows: Vec<R>,
}

impl<R> Default for DayRows<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: CarryForward> DayRows<R> {
    /// Empty arena with room for days `0..=horizon`.
    pub fn with_horizon(horizon: DayIndex) -> Self {
        Self { rows: Vec::with_capacity(horizon + 1) }
    }

    /// Start over with `row` as day 0.
    pub fn seed(&mut self, row: R) {
        self.rows.clear();
        self.rows.push(row);
    }

    /// Carry the previous day forward into `day`. Opening a day that
    /// already exists discards it and everything after it first.
    pub fn open_day(&mut self, day: DayIndex) -> ForecastResult<&mut R> {
        if day == 0 || day > self.rows.len() {
            return Err(ForecastError::RowGap { expected: self.rows.len(), actual: day });
        }
        self.rows.truncate(day);
        let next = self.rows[day - 1].carry_forward();
        self.rows.push(next);
        Ok(&mut self.rows[day])
    }

    pub fn reserve(&mut self, additional: usize) {
        self.rows.reserve(additional);
    }
}

impl<R> DayRows<R> {
    pub fn get(&self, day: DayIndex) -> Option<&R> {
        self.rows.get(day)
    }

    pub fn get_mut(&mut self, day: DayIndex) -> Option<&mut R> {
        self.rows.get_mut(day)
    }

    pub fn last(&self) -> Option<&R> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.iter()
    }
}
