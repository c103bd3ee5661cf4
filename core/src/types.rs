//! Shared primitive types used across the entire forecast.

/// Zero-based offset of a simulated day from the run's start date.
pub type DayIndex = usize;

/// A stable, user-visible identifier for any ledger entity (its name).
pub type EntityId = String;

/// Length of a year in days for every rate conversion.
pub const DAYS_IN_YEAR: f64 = 365.25;

/// Savings interest compounds once per calendar month.
pub const MONTHS_IN_YEAR: f64 = 12.0;
