use crate::{ledger::FundingSource, recurrence::Frequency, types::EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Anything with a recurring amount on a schedule.
pub trait Scheduled {
    fn amount(&self) -> f64;
    fn frequency(&self) -> Frequency;
    fn next_date(&self) -> Option<NaiveDate>;
    fn end_date(&self) -> Option<NaiveDate>;
}

// ── Gains ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gain {
    pub description:  String,
    pub amount:       f64,
    pub frequency:    Frequency,
    pub next_deposit: Option<NaiveDate>,
    pub end_date:     Option<NaiveDate>,
    pub destination:  EntityId,
}

impl Gain {
    pub fn new(description: &str, amount: f64, frequency: Frequency, next_deposit: NaiveDate, destination: &str) -> Self {
        Self {
            description:  description.to_string(),
            amount,
            frequency,
            next_deposit: Some(next_deposit),
            end_date:     None,
            destination:  destination.to_string(),
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

// ── Expenses ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub description: String,
    pub amount:      f64,
    pub frequency:   Frequency,
    pub next_loss:   Option<NaiveDate>,
    pub end_date:    Option<NaiveDate>,
    pub source:      FundingSource,
}

impl Expense {
    pub fn new(description: &str, amount: f64, frequency: Frequency, next_loss: NaiveDate, source: FundingSource) -> Self {
        Self {
            description: description.to_string(),
            amount,
            frequency,
            next_loss:   Some(next_loss),
            end_date:    None,
            source,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

// ── Transfers ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub description:   String,
    pub source:        EntityId,
    pub destination:   EntityId,
    pub amount:        f64,
    pub frequency:     Frequency,
    pub next_transfer: Option<NaiveDate>,
    pub end_date:      Option<NaiveDate>,
}

impl Transfer {
    pub fn new(
        description: &str,
        source: &str,
        destination: &str,
        amount: f64,
        frequency: Frequency,
        next_transfer: NaiveDate,
    ) -> Self {
        Self {
            description:   description.to_string(),
            source:        source.to_string(),
            destination:   destination.to_string(),
            amount,
            frequency,
            next_transfer: Some(next_transfer),
            end_date:      None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

macro_rules! impl_scheduled {
    ($ty:ty, $next:ident) => {
        impl Scheduled for $ty {
            fn amount(&self) -> f64 { self.amount }
            fn frequency(&self) -> Frequency { self.frequency }
            fn next_date(&self) -> Option<NaiveDate> { self.$next }
            fn end_date(&self) -> Option<NaiveDate> { self.end_date }
        }
    };
}

impl_scheduled!(Gain, next_deposit);
impl_scheduled!(Expense, next_loss);
impl_scheduled!(Transfer, next_transfer);
impl_scheduled!(crate::ledger::BudgetItem, next_loss);
