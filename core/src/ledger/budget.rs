use crate::{ledger::FundingSource, recurrence::Frequency};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

// ── Budget (envelope items) ──────────────────────────────────────

/// What happens to an item's leftover when it resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainAction {
    /// Leftover rolls into the next period.
    Accumulate,
    /// Leftover is gone; the envelope refills to the loss amount.
    Disappear,
    /// Leftover returns to the source before the new loss is taken.
    AddBack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Honor remain actions and commit remainders on update.
    pub auto_reset:    bool,
    pub weekly_reset:  Weekday,
    /// Day of month monthly items reset on, clamped to short months.
    pub monthly_reset: u32,
    pub items:         Vec<BudgetItem>,
}

impl Default for Budget {
    fn default() -> Self {
        Self::new(false, Weekday::Sun, 1)
    }
}

impl Budget {
    pub fn new(auto_reset: bool, weekly_reset: Weekday, monthly_reset: u32) -> Self {
        Self { auto_reset, weekly_reset, monthly_reset, items: Vec::new() }
    }

    pub fn with_item(mut self, item: BudgetItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn item(&self, description: &str) -> Option<&BudgetItem> {
        self.items.iter().find(|i| i.description == description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub description:    String,
    pub amount:         f64,
    pub frequency:      Frequency,
    pub next_loss:      Option<NaiveDate>,
    pub end_date:       Option<NaiveDate>,
    /// Scale the loss by the part of the period still ahead.
    pub prorated_start: bool,
    pub remain_action:  RemainAction,
    /// Amount left in the envelope right now.
    pub current_amount: f64,
    pub source:         FundingSource,
}

impl BudgetItem {
    pub fn new(description: &str, amount: f64, frequency: Frequency, next_loss: NaiveDate, source: FundingSource) -> Self {
        Self {
            description:    description.to_string(),
            amount,
            frequency,
            next_loss:      Some(next_loss),
            end_date:       None,
            prorated_start: false,
            remain_action:  RemainAction::Accumulate,
            current_amount: 0.0,
            source,
        }
    }

    pub fn prorated(mut self) -> Self {
        self.prorated_start = true;
        self
    }

    pub fn with_remain_action(mut self, action: RemainAction) -> Self {
        self.remain_action = action;
        self
    }

    pub fn with_current_amount(mut self, amount: f64) -> Self {
        self.current_amount = amount;
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}
