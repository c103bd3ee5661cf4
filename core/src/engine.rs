//! The forecast engine: steps a ledger forward one day at a time.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   0. Row initialization  (seed day 0 from the ledger, or carry forward)
//!   1. Contributions
//!   2. Transfers
//!   3. Income
//!   4. Debt payments
//!   5. Expenses
//!   6. Envelope resets
//!   7. Debt interest
//!   8. Savings interest
//!
//! RULES:
//!   - Subsystems execute in registration order, every day.
//!   - Subsystems read and write only today's rows; the ledger is
//!     read-only while days are stepped.
//!   - Live entities change only in update() and update_next_dates_only(),
//!     after the last day has stepped. A failed run leaves them untouched.
//!   - update(a, b) then update(b, c) must leave the ledger exactly as
//!     update(a, c) does.

use crate::{
    clock::{days_between, ForecastClock},
    commit::{commit, CommitScope},
    config::ForecastConfig,
    contribution_subsystem::ContributionSubsystem,
    debt_interest_subsystem::DebtInterestSubsystem,
    envelope_subsystem::EnvelopeSubsystem,
    error::{ForecastError, ForecastResult},
    expense_subsystem::ExpenseSubsystem,
    income_subsystem::IncomeSubsystem,
    ledger::Ledger,
    payment_subsystem::PaymentSubsystem,
    projection::Projection,
    savings_interest_subsystem::SavingsInterestSubsystem,
    subsystem::{DayContext, ForecastSubsystem, RemainMode},
    transfer_subsystem::TransferSubsystem,
    types::DayIndex,
};
use chrono::NaiveDate;

pub struct ForecastEngine {
    /// Clock of the most recent run.
    pub clock:  Option<ForecastClock>,
    config:     ForecastConfig,
    subsystems: Vec<Box<dyn ForecastSubsystem>>,
    projection: Projection,
}

/// Day index of `target` in a run starting at `start`.
fn last_day_index(start: NaiveDate, target: NaiveDate) -> ForecastResult<DayIndex> {
    usize::try_from(days_between(start, target))
        .map_err(|_| ForecastError::TargetBeforeStart { start, target })
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            clock:      None,
            config,
            subsystems: Vec::new(),
            projection: Projection::new(),
        }
    }

    /// Build a fully wired engine with all subsystems registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(config: ForecastConfig) -> Self {
        let mut engine = ForecastEngine::new(config);

        // EXECUTION ORDER: fixed, documented, never reordered.
        engine.register(Box::new(ContributionSubsystem));
        engine.register(Box::new(TransferSubsystem));
        engine.register(Box::new(IncomeSubsystem));
        engine.register(Box::new(PaymentSubsystem));
        engine.register(Box::new(ExpenseSubsystem));
        engine.register(Box::new(EnvelopeSubsystem));
        engine.register(Box::new(DebtInterestSubsystem));
        engine.register(Box::new(SavingsInterestSubsystem));
        engine
    }

    pub fn build_test() -> Self {
        Self::build(ForecastConfig::default_test())
    }

    /// Register a subsystem. Call in the documented execution order.
    pub fn register(&mut self, subsystem: Box<dyn ForecastSubsystem>) {
        self.subsystems.push(subsystem);
    }

    pub fn subsystem_names(&self) -> Vec<&'static str> {
        self.subsystems.iter().map(|s| s.name()).collect()
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Rows of the most recent run.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Drop all rows. Call between independent runs over different ledgers.
    pub fn clear(&mut self) {
        self.projection.clear();
        self.clock = None;
    }

    /// Forecast every day from `start` through `target`. Envelope items
    /// are assumed fully spent. The ledger is not modified.
    pub fn predict(&mut self, ledger: &Ledger, start: NaiveDate, target: NaiveDate) -> ForecastResult<()> {
        self.run(ledger, start, target, RemainMode::AssumeSpent)?;
        Ok(())
    }

    /// Extend a finished `predict(start, last_target)` through `new_target`.
    pub fn predict_continue(
        &mut self,
        ledger: &Ledger,
        start: NaiveDate,
        last_target: NaiveDate,
        new_target: NaiveDate,
    ) -> ForecastResult<()> {
        let last_day = last_day_index(start, last_target)?;
        let new_last_day = last_day_index(start, new_target)?;
        if new_last_day < last_day {
            return Err(ForecastError::TargetBeforeStart { start: last_target, target: new_target });
        }
        if self.projection.start() != Some(start) || self.projection.days() != last_day + 1 {
            return Err(ForecastError::HistoryMismatch {
                expected: last_day + 1,
                actual:   self.projection.days(),
            });
        }
        self.projection.check_shape(ledger)?;

        log::debug!("predict_continue: {last_target} -> {new_target}");
        self.projection.reserve(new_last_day - last_day);
        let mut clock = ForecastClock::resume_after(start, last_day);
        self.step_through(ledger, &mut clock, new_last_day, RemainMode::AssumeSpent)?;
        self.clock = Some(clock);
        Ok(())
    }

    /// Forecast `start` through `end`, then commit the final day's values
    /// and schedules onto the ledger. Remain actions are honored when the
    /// budget auto-resets.
    pub fn update(&mut self, ledger: &mut Ledger, start: NaiveDate, end: NaiveDate) -> ForecastResult<()> {
        self.run_and_commit(ledger, start, end, CommitScope::Full)
    }

    /// Like update(), but only schedule dates (and auto-reset envelope
    /// remainders) are committed. Payment and savings goals are cleared.
    pub fn update_next_dates_only(&mut self, ledger: &mut Ledger, start: NaiveDate, end: NaiveDate) -> ForecastResult<()> {
        self.run_and_commit(ledger, start, end, CommitScope::NextDatesOnly)
    }

    fn run_and_commit(
        &mut self,
        ledger: &mut Ledger,
        start: NaiveDate,
        end: NaiveDate,
        scope: CommitScope,
    ) -> ForecastResult<()> {
        let mode = if ledger.budget.auto_reset {
            RemainMode::Honor
        } else {
            RemainMode::AssumeSpent
        };
        let last_day = self.run(ledger, start, end, mode)?;
        commit(ledger, &self.projection, last_day, end, scope, &self.config)?;
        log::debug!("committed {scope:?} state as of {end}");
        Ok(())
    }

    fn run(&mut self, ledger: &Ledger, start: NaiveDate, target: NaiveDate, mode: RemainMode) -> ForecastResult<DayIndex> {
        let last_day = last_day_index(start, target)?;
        log::debug!("forecast: {start} -> {target} ({} days, {mode:?})", last_day + 1);

        self.projection.seed(ledger, start, last_day);
        let mut clock = ForecastClock::new(start);
        self.step_through(ledger, &mut clock, last_day, mode)?;
        self.clock = Some(clock);
        Ok(last_day)
    }

    /// Step days until the clock reaches `last_day`. Day 0 must already
    /// be seeded if the clock has not run yet.
    fn step_through(
        &mut self,
        ledger: &Ledger,
        clock: &mut ForecastClock,
        last_day: DayIndex,
        mode: RemainMode,
    ) -> ForecastResult<()> {
        clock.resume();
        while clock.current_day.map_or(true, |d| d < last_day) {
            let day = clock.advance();
            if day > 0 {
                self.projection.open_day(day)?;
            }

            let mut ctx = DayContext {
                ledger,
                projection:  &mut self.projection,
                day,
                date:        clock.date_of(day),
                remain_mode: mode,
                record:      self.config.record_transactions,
            };

            let mut handled = 0;
            for subsystem in &mut self.subsystems {
                handled += subsystem.update(&mut ctx)?;
            }
            if handled > 0 {
                log::trace!("day={day} date={} handled={handled}", ctx.date);
            }
        }
        clock.pause();
        Ok(())
    }
}
