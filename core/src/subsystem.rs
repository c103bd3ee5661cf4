//! Subsystem trait: one per-day handler of the forecast loop.
//!
//! RULE: Every handler implements ForecastSubsystem.
//! The engine calls update() on each registered subsystem
//! in registration order, every simulated day.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    error::ForecastResult,
    ledger::Ledger,
    projection::Projection,
    types::DayIndex,
};
use chrono::NaiveDate;

/// How envelope items treat their leftover on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainMode {
    /// Every item behaves as `Disappear`: the full amount is assumed spent.
    AssumeSpent,
    /// Each item follows its configured remain action.
    Honor,
}

/// Everything a handler may see on one simulated day.
///
/// The ledger is read-only: handlers read schedules and amounts from
/// today's rows, never from live entities, and write only rows.
pub struct DayContext<'a> {
    pub ledger:      &'a Ledger,
    pub projection:  &'a mut Projection,
    pub day:         DayIndex,
    pub date:        NaiveDate,
    pub remain_mode: RemainMode,
    pub record:      bool,
}

impl DayContext<'_> {
    /// An event fires today when its next date is today and its end
    /// date, if any, has not passed.
    pub fn is_due(&self, next: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        if end.is_some_and(|end| self.date > end) {
            return false;
        }
        next == Some(self.date)
    }
}

/// The contract every per-day handler must fulfill.
pub trait ForecastSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per simulated day by the engine.
    ///
    /// Returns the number of events handled today.
    fn update(&mut self, ctx: &mut DayContext<'_>) -> ForecastResult<usize>;
}
