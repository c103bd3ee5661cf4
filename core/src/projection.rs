//! Projection: every snapshot row of one forecast run.
//!
//! Row collections are parallel to the ledger's entity collections:
//! `accounts[i]` holds the rows of `ledger.accounts[i]`, and so on.
//! The projection is the engine's working memory during a run and the
//! audit trail after it.

use crate::{
    error::{ForecastError, ForecastResult},
    event::{Party, TransactionRecord, Verb},
    ledger::{FundingSource, Ledger},
    snapshot::{AccountRow, DayRows, DebtRow, EnvelopeRow, ScheduleRow},
    types::DayIndex,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Something a loss can be drawn from on a given day.
pub trait FundingSink {
    /// Take `amount` for `description`. With `add_back`, first return
    /// that much to the sink (an envelope's prior remainder).
    fn apply_loss(
        &mut self,
        sink_name: &str,
        description: &str,
        amount: f64,
        add_back: Option<f64>,
        record: bool,
    );
}

impl FundingSink for AccountRow {
    fn apply_loss(&mut self, sink_name: &str, description: &str, amount: f64, add_back: Option<f64>, record: bool) {
        if let Some(back) = add_back.filter(|b| *b != 0.0) {
            let before = self.value;
            self.value += back;
            if record {
                self.history.push(TransactionRecord::new(
                    self.date,
                    back,
                    Party::label(description, Verb::AddedBackFrom),
                    Party::balance(sink_name, Verb::To, before, self.value),
                ));
            }
        }
        let before = self.value;
        self.value -= amount;
        if record {
            self.history.push(TransactionRecord::new(
                self.date,
                amount,
                Party::balance(sink_name, Verb::WithdrawnFrom, before, self.value),
                Party::label(description, Verb::To),
            ));
        }
    }
}

/// Credit cards carry spending as a growing balance.
impl FundingSink for DebtRow {
    fn apply_loss(&mut self, sink_name: &str, description: &str, amount: f64, add_back: Option<f64>, record: bool) {
        if let Some(back) = add_back.filter(|b| *b != 0.0) {
            let before = self.value;
            self.value -= back;
            if record {
                self.history.push(TransactionRecord::new(
                    self.date,
                    back,
                    Party::label(description, Verb::AddedBackFrom),
                    Party::balance(sink_name, Verb::To, before, self.value),
                ));
            }
        }
        let before = self.value;
        self.value += amount;
        if record {
            self.history.push(TransactionRecord::new(
                self.date,
                amount,
                Party::balance(sink_name, Verb::CreditedFrom, before, self.value),
                Party::label(description, Verb::To),
            ));
        }
    }
}

fn row<'a, R>(rows: &'a [DayRows<R>], idx: usize, day: DayIndex, entity: &'static str) -> ForecastResult<&'a R> {
    rows.get(idx)
        .and_then(|r| r.get(day))
        .ok_or(ForecastError::MissingRow { entity, day })
}

fn row_mut<'a, R>(rows: &'a mut [DayRows<R>], idx: usize, day: DayIndex, entity: &'static str) -> ForecastResult<&'a mut R> {
    rows.get_mut(idx)
        .and_then(|r| r.get_mut(day))
        .ok_or(ForecastError::MissingRow { entity, day })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    start:         Option<NaiveDate>,
    days:          usize,
    shape:         [usize; 6],
    pub accounts:  Vec<DayRows<AccountRow>>,
    pub debts:     Vec<DayRows<DebtRow>>,
    pub gains:     Vec<DayRows<ScheduleRow>>,
    pub expenses:  Vec<DayRows<ScheduleRow>>,
    pub transfers: Vec<DayRows<ScheduleRow>>,
    pub envelopes: Vec<DayRows<EnvelopeRow>>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all rows and seed day 0 from the live ledger, with room
    /// for days `0..=horizon`.
    pub fn seed(&mut self, ledger: &Ledger, start: NaiveDate, horizon: DayIndex) {
        fn seeded<R: crate::snapshot::CarryForward>(row: R, horizon: DayIndex) -> DayRows<R> {
            let mut rows = DayRows::with_horizon(horizon);
            rows.seed(row);
            rows
        }

        self.accounts = ledger.accounts.iter()
            .map(|a| seeded(AccountRow::seed(a, start), horizon))
            .collect();
        self.debts = ledger.debts.iter()
            .map(|d| seeded(DebtRow::seed(d, start), horizon))
            .collect();
        self.gains = ledger.gains.iter()
            .map(|g| seeded(ScheduleRow::seed(g, start), horizon))
            .collect();
        self.expenses = ledger.expenses.iter()
            .map(|e| seeded(ScheduleRow::seed(e, start), horizon))
            .collect();
        self.transfers = ledger.transfers.iter()
            .map(|t| seeded(ScheduleRow::seed(t, start), horizon))
            .collect();
        self.envelopes = ledger.budget.items.iter()
            .map(|i| seeded(EnvelopeRow::seed(i, start), horizon))
            .collect();

        self.start = Some(start);
        self.days = 1;
        self.shape = ledger.shape();
    }

    /// Carry every entity's previous row forward into `day`.
    pub fn open_day(&mut self, day: DayIndex) -> ForecastResult<()> {
        for rows in &mut self.accounts  { rows.open_day(day)?; }
        for rows in &mut self.debts     { rows.open_day(day)?; }
        for rows in &mut self.gains     { rows.open_day(day)?; }
        for rows in &mut self.expenses  { rows.open_day(day)?; }
        for rows in &mut self.transfers { rows.open_day(day)?; }
        for rows in &mut self.envelopes { rows.open_day(day)?; }
        self.days = day + 1;
        Ok(())
    }

    /// Make room for `additional` more days in every arena.
    pub fn reserve(&mut self, additional: usize) {
        for rows in &mut self.accounts  { rows.reserve(additional); }
        for rows in &mut self.debts     { rows.reserve(additional); }
        for rows in &mut self.gains     { rows.reserve(additional); }
        for rows in &mut self.expenses  { rows.reserve(additional); }
        for rows in &mut self.transfers { rows.reserve(additional); }
        for rows in &mut self.envelopes { rows.reserve(additional); }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Number of populated days.
    pub fn days(&self) -> usize {
        self.days
    }

    pub fn check_shape(&self, ledger: &Ledger) -> ForecastResult<()> {
        if self.shape == ledger.shape() {
            Ok(())
        } else {
            Err(ForecastError::LedgerShapeChanged)
        }
    }

    // ── Row access ───────────────────────────────────────────────

    pub fn account_row(&self, idx: usize, day: DayIndex) -> ForecastResult<&AccountRow> {
        row(&self.accounts, idx, day, "account")
    }

    pub fn account_row_mut(&mut self, idx: usize, day: DayIndex) -> ForecastResult<&mut AccountRow> {
        row_mut(&mut self.accounts, idx, day, "account")
    }

    pub fn debt_row(&self, idx: usize, day: DayIndex) -> ForecastResult<&DebtRow> {
        row(&self.debts, idx, day, "debt")
    }

    pub fn debt_row_mut(&mut self, idx: usize, day: DayIndex) -> ForecastResult<&mut DebtRow> {
        row_mut(&mut self.debts, idx, day, "debt")
    }

    pub fn gain_row(&self, idx: usize, day: DayIndex) -> ForecastResult<&ScheduleRow> {
        row(&self.gains, idx, day, "gain")
    }

    pub fn expense_row(&self, idx: usize, day: DayIndex) -> ForecastResult<&ScheduleRow> {
        row(&self.expenses, idx, day, "expense")
    }

    pub fn transfer_row(&self, idx: usize, day: DayIndex) -> ForecastResult<&ScheduleRow> {
        row(&self.transfers, idx, day, "transfer")
    }

    pub fn envelope_row(&self, idx: usize, day: DayIndex) -> ForecastResult<&EnvelopeRow> {
        row(&self.envelopes, idx, day, "envelope")
    }

    pub fn gain_row_mut(&mut self, idx: usize, day: DayIndex) -> ForecastResult<&mut ScheduleRow> {
        row_mut(&mut self.gains, idx, day, "gain")
    }

    pub fn expense_row_mut(&mut self, idx: usize, day: DayIndex) -> ForecastResult<&mut ScheduleRow> {
        row_mut(&mut self.expenses, idx, day, "expense")
    }

    pub fn transfer_row_mut(&mut self, idx: usize, day: DayIndex) -> ForecastResult<&mut ScheduleRow> {
        row_mut(&mut self.transfers, idx, day, "transfer")
    }

    pub fn envelope_row_mut(&mut self, idx: usize, day: DayIndex) -> ForecastResult<&mut EnvelopeRow> {
        row_mut(&mut self.envelopes, idx, day, "envelope")
    }

    /// Add `delta` to an account's value for the day. Returns (before, after).
    pub fn adjust_account(&mut self, idx: usize, day: DayIndex, delta: f64) -> ForecastResult<(f64, f64)> {
        let row = self.account_row_mut(idx, day)?;
        let before = row.value;
        row.value += delta;
        Ok((before, row.value))
    }

    pub fn log_account(&mut self, idx: usize, day: DayIndex, record: TransactionRecord) -> ForecastResult<()> {
        self.account_row_mut(idx, day)?.history.push(record);
        Ok(())
    }

    pub fn log_debt(&mut self, idx: usize, day: DayIndex, record: TransactionRecord) -> ForecastResult<()> {
        self.debt_row_mut(idx, day)?.history.push(record);
        Ok(())
    }

    /// Draw a loss from whichever row backs `source` today.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_loss(
        &mut self,
        ledger: &Ledger,
        source: &FundingSource,
        description: &str,
        amount: f64,
        add_back: Option<f64>,
        day: DayIndex,
        record: bool,
    ) -> ForecastResult<()> {
        let sink: &mut dyn FundingSink = match source {
            FundingSource::Account(name) => {
                let idx = ledger.account_index(name)?;
                self.account_row_mut(idx, day)?
            }
            FundingSource::CreditCard(name) => {
                let idx = ledger.debt_index(name)?;
                self.debt_row_mut(idx, day)?
            }
        };
        sink.apply_loss(source.name(), description, amount, add_back, record);
        Ok(())
    }

    // ── Lookup by name ───────────────────────────────────────────

    pub fn account_on(&self, ledger: &Ledger, name: &str, day: DayIndex) -> Option<&AccountRow> {
        let idx = ledger.account_index(name).ok()?;
        self.accounts.get(idx)?.get(day)
    }

    pub fn debt_on(&self, ledger: &Ledger, name: &str, day: DayIndex) -> Option<&DebtRow> {
        let idx = ledger.debt_index(name).ok()?;
        self.debts.get(idx)?.get(day)
    }

    pub fn envelope_on(&self, ledger: &Ledger, description: &str, day: DayIndex) -> Option<&EnvelopeRow> {
        let idx = ledger.budget.items.iter().position(|i| i.description == description)?;
        self.envelopes.get(idx)?.get(day)
    }

    /// Full history as JSON, for export and inspection.
    pub fn to_json(&self) -> ForecastResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
