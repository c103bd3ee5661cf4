//! Ledger: the live entities a forecast runs over.
//!
//! Entities are plain data, assumed validated by whoever built them.
//! The engine only mutates them inside `update` and `update_next_dates_only`.

mod account;
mod budget;
mod debt;
mod schedule;

pub use account::{Account, AccountKind, Contribution, SavingsGoal, SavingsTerms};
pub use budget::{Budget, BudgetItem, RemainAction};
pub use debt::{Debt, DebtKind, InterestModel, LoanTerms, Payment, PaymentAmount};
pub use schedule::{Expense, Gain, Scheduled, Transfer};

use crate::{
    error::{ForecastError, ForecastResult},
    types::EntityId,
};
use serde::{Deserialize, Serialize};

/// Where a loss is drawn from. Accounts shrink, credit cards grow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum FundingSource {
    Account(EntityId),
    CreditCard(EntityId),
}

impl FundingSource {
    pub fn account(name: &str) -> Self {
        FundingSource::Account(name.to_string())
    }

    pub fn credit_card(name: &str) -> Self {
        FundingSource::CreditCard(name.to_string())
    }

    pub fn name(&self) -> &str {
        match self {
            FundingSource::Account(name) | FundingSource::CreditCard(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub accounts:  Vec<Account>,
    pub debts:     Vec<Debt>,
    pub gains:     Vec<Gain>,
    pub expenses:  Vec<Expense>,
    pub transfers: Vec<Transfer>,
    pub budget:    Budget,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&mut self, account: Account) -> &mut Self {
        self.accounts.push(account);
        self
    }

    pub fn add_debt(&mut self, debt: Debt) -> &mut Self {
        self.debts.push(debt);
        self
    }

    pub fn add_gain(&mut self, gain: Gain) -> &mut Self {
        self.gains.push(gain);
        self
    }

    pub fn add_expense(&mut self, expense: Expense) -> &mut Self {
        self.expenses.push(expense);
        self
    }

    pub fn add_transfer(&mut self, transfer: Transfer) -> &mut Self {
        self.transfers.push(transfer);
        self
    }

    pub fn set_budget(&mut self, budget: Budget) -> &mut Self {
        self.budget = budget;
        self
    }

    pub fn account_index(&self, name: &str) -> ForecastResult<usize> {
        self.accounts
            .iter()
            .position(|a| a.name == name)
            .ok_or_else(|| ForecastError::UnknownAccount { name: name.to_string() })
    }

    pub fn debt_index(&self, name: &str) -> ForecastResult<usize> {
        self.debts
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| ForecastError::UnknownDebt { name: name.to_string() })
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    pub fn debt(&self, name: &str) -> Option<&Debt> {
        self.debts.iter().find(|d| d.name == name)
    }

    /// Entity counts per collection, used to detect a reshaped ledger.
    pub fn shape(&self) -> [usize; 6] {
        [
            self.accounts.len(),
            self.debts.len(),
            self.gains.len(),
            self.expenses.len(),
            self.transfers.len(),
            self.budget.items.len(),
        ]
    }
}
