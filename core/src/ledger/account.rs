use crate::{recurrence::Frequency, types::EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Accounts ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name:  EntityId,
    pub value: f64,
    pub kind:  AccountKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings(SavingsTerms),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub amount:    f64,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub amount: f64,
    /// Date the goal is expected to be reached, if one was planned.
    pub date:   Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsTerms {
    /// Account contributions are withdrawn from.
    pub source_account:    EntityId,
    pub contribution:      Option<Contribution>,
    pub next_contribution: Option<NaiveDate>,
    pub end_date:          Option<NaiveDate>,
    /// Annual rate, compounded monthly on the 1st.
    pub interest_rate:     Option<f64>,
    pub goal:              Option<SavingsGoal>,
}

impl SavingsTerms {
    pub fn new(source_account: &str) -> Self {
        Self {
            source_account:    source_account.to_string(),
            contribution:      None,
            next_contribution: None,
            end_date:          None,
            interest_rate:     None,
            goal:              None,
        }
    }

    pub fn with_contribution(mut self, amount: f64, frequency: Frequency, next: NaiveDate) -> Self {
        self.contribution = Some(Contribution { amount, frequency });
        self.next_contribution = Some(next);
        self
    }

    pub fn with_interest(mut self, rate: f64) -> Self {
        self.interest_rate = Some(rate);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_goal(mut self, amount: f64, date: Option<NaiveDate>) -> Self {
        self.goal = Some(SavingsGoal { amount, date });
        self
    }
}

impl Account {
    pub fn checking(name: &str, value: f64) -> Self {
        Self { name: name.to_string(), value, kind: AccountKind::Checking }
    }

    pub fn savings(name: &str, value: f64, terms: SavingsTerms) -> Self {
        Self { name: name.to_string(), value, kind: AccountKind::Savings(terms) }
    }

    pub fn savings_terms(&self) -> Option<&SavingsTerms> {
        match &self.kind {
            AccountKind::Savings(terms) => Some(terms),
            AccountKind::Checking       => None,
        }
    }
}
