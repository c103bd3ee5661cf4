use crate::types::DayIndex;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Account '{name}' not found in ledger")]
    UnknownAccount { name: String },

    #[error("Debt '{name}' not found in ledger")]
    UnknownDebt { name: String },

    #[error("No {entity} row for day {day}")]
    MissingRow { entity: &'static str, day: DayIndex },

    #[error("Row gap: next writable day is {expected}, got {actual}")]
    RowGap { expected: DayIndex, actual: DayIndex },

    #[error("Target {target} precedes start {start}")]
    TargetBeforeStart { start: NaiveDate, target: NaiveDate },

    #[error("History holds {actual} days, continuation needs {expected}")]
    HistoryMismatch { expected: usize, actual: usize },

    #[error("Ledger entities changed since the projection was seeded")]
    LedgerShapeChanged,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ForecastResult<T> = Result<T, ForecastError>;
