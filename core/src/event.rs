//! Transaction records: the audit trail written into snapshot rows.
//!
//! Every handled event logs one record on the row of each side it touched.
//! Records are data only; nothing reads them back during a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    From,
    To,
    WithdrawnFrom,
    DepositedTo,
    ContributedTo,
    CreditedFrom,
    PaidTo,
    AddedBackFrom,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verb::From          => "from",
            Verb::To            => "to",
            Verb::WithdrawnFrom => "withdrawn from",
            Verb::DepositedTo   => "deposited to",
            Verb::ContributedTo => "contributed to",
            Verb::CreditedFrom  => "credited from",
            Verb::PaidTo        => "paid to",
            Verb::AddedBackFrom => "added back from",
        };
        f.write_str(label)
    }
}

/// One side of a transaction. Balances are None for sides with no
/// tracked value (an income source, an expense description).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name:   String,
    pub verb:   Verb,
    pub before: Option<f64>,
    pub after:  Option<f64>,
}

impl Party {
    pub fn label(name: &str, verb: Verb) -> Self {
        Self { name: name.to_string(), verb, before: None, after: None }
    }

    pub fn balance(name: &str, verb: Verb, before: f64, after: f64) -> Self {
        Self { name: name.to_string(), verb, before: Some(before), after: Some(after) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date:        NaiveDate,
    pub amount:      f64,
    pub source:      Party,
    pub destination: Party,
}

impl TransactionRecord {
    pub fn new(date: NaiveDate, amount: f64, source: Party, destination: Party) -> Self {
        Self { date, amount, source, destination }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} {} {} {} {}",
            self.date,
            self.amount,
            self.source.verb,
            self.source.name,
            self.destination.verb,
            self.destination.name,
        )
    }
}
