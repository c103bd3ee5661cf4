//! Day-stepped forecasting of a personal ledger.
//!
//! `engine::ForecastEngine` walks a `ledger::Ledger` forward one day at a
//! time, recording every entity's state per day in a `projection::Projection`
//! and, on `update`, committing the last day back onto the ledger.
//! `amortization` holds the goal-seeking math and `analysis` the
//! frequency-normalized reports over live entities.

pub mod amortization;
pub mod analysis;
pub mod clock;
pub mod commit;
pub mod config;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod event;
pub mod ledger;
pub mod projection;
pub mod recurrence;
pub mod snapshot;
pub mod subsystem;
pub mod types;

pub mod contribution_subsystem;
pub mod debt_interest_subsystem;
pub mod envelope_subsystem;
pub mod expense_subsystem;
pub mod income_subsystem;
pub mod payment_subsystem;
pub mod savings_interest_subsystem;
pub mod transfer_subsystem;
