//! Commit: write a run's final day back onto the live ledger.
//!
//! Full commits move values and schedules. Next-dates-only commits move
//! schedules alone, plus auto-reset envelope remainders, and drop every
//! goal whose justification was the amount that did not move.

use crate::{
    amortization::{find_goal_date_compound_interest, find_goal_date_simple_interest},
    clock::{add_days, days_between},
    config::ForecastConfig,
    error::ForecastResult,
    ledger::{AccountKind, Debt, DebtKind, Ledger},
    projection::Projection,
    types::DayIndex,
};
use chrono::{Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitScope {
    Full,
    NextDatesOnly,
}

/// Whether a debt's payment goal still follows from its committed state.
///
/// Re-runs the goal search from the day after `end`, when interest next
/// accrues. A debt already at zero has met its goal.
fn payment_goal_holds(debt: &Debt, goal: NaiveDate, end: NaiveDate, config: &ForecastConfig) -> bool {
    if debt.amount <= 0.0 {
        return true;
    }
    let Some(payment) = &debt.payment else { return false };
    let (Some(amount), Some(next)) = (payment.fixed_amount(), payment.next_payment) else {
        return false;
    };

    let interest_start = add_days(end, 1);
    let days_before = days_between(interest_start, next).max(0);
    let limit = interest_start.checked_add_months(Months::new(12 * config.goal_limit_years));
    let rate = debt.interest_rate.unwrap_or(0.0);

    let projected = match debt.simple_interest_terms() {
        Some(terms) => find_goal_date_simple_interest(
            next, days_before, amount, payment.frequency, debt.amount, rate, terms.principal, limit,
        ),
        None => find_goal_date_compound_interest(
            next, days_before, amount, payment.frequency, debt.amount, rate, limit,
        ),
    };
    projected == Some(goal)
}

/// Commit the rows of `day` (the run's last day, dated `end`) onto `ledger`.
pub fn commit(
    ledger: &mut Ledger,
    projection: &Projection,
    day: DayIndex,
    end: NaiveDate,
    scope: CommitScope,
    config: &ForecastConfig,
) -> ForecastResult<()> {
    projection.check_shape(ledger)?;
    let full = scope == CommitScope::Full;

    // ── Accounts ─────────────────────────────────────────────────
    for (idx, account) in ledger.accounts.iter_mut().enumerate() {
        let row = projection.account_row(idx, day)?;
        if full {
            account.value = row.value;
        }
        if let AccountKind::Savings(terms) = &mut account.kind {
            terms.next_contribution = row.next_contribution;
            if !full && terms.goal.take().is_some() {
                log::debug!("cleared savings goal on {}", account.name);
            }
        }
    }

    // ── Debts ────────────────────────────────────────────────────
    for (idx, debt) in ledger.debts.iter_mut().enumerate() {
        let row = projection.debt_row(idx, day)?;
        if full {
            debt.amount = row.value;
            if let DebtKind::Loan(terms) = &mut debt.kind {
                terms.principal = row.principal;
                terms.interest = row.interest;
            }
        }
        let Some(payment) = debt.payment.as_mut() else { continue };
        payment.next_payment = row.next_payment;

        let clear_goal = match (scope, payment.goal_date) {
            (_, None)                        => false,
            (CommitScope::NextDatesOnly, _)  => true,
            (CommitScope::Full, Some(goal))  => !payment_goal_holds(debt, goal, end, config),
        };
        if clear_goal {
            if let Some(payment) = debt.payment.as_mut() {
                payment.goal_date = None;
            }
            log::debug!("cleared payment goal on {}", debt.name);
        }
    }

    // ── Schedules ────────────────────────────────────────────────
    for (idx, gain) in ledger.gains.iter_mut().enumerate() {
        gain.next_deposit = projection.gain_row(idx, day)?.next_date;
    }
    for (idx, expense) in ledger.expenses.iter_mut().enumerate() {
        expense.next_loss = projection.expense_row(idx, day)?.next_date;
    }
    for (idx, transfer) in ledger.transfers.iter_mut().enumerate() {
        transfer.next_transfer = projection.transfer_row(idx, day)?.next_date;
    }

    // ── Budget ───────────────────────────────────────────────────
    let auto_reset = ledger.budget.auto_reset;
    for (idx, item) in ledger.budget.items.iter_mut().enumerate() {
        let row = projection.envelope_row(idx, day)?;
        item.next_loss = row.next_reset;
        if auto_reset {
            item.current_amount = row.updated_remaining;
        }
    }

    Ok(())
}
