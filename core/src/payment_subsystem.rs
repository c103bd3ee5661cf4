//! Debt payments: source account pays the debt.
//!
//! A payment never drives a debt below zero: an overpayment, or a payoff
//! payment, pays exactly the balance. Simple-interest loans retire
//! accrued interest first and put the rest against principal.

use crate::{
    error::ForecastResult,
    event::{Party, TransactionRecord, Verb},
    ledger::{DebtKind, PaymentAmount},
    recurrence::next_occurrence,
    snapshot::DebtRow,
    subsystem::{DayContext, ForecastSubsystem},
};

pub struct PaymentSubsystem;

/// Split a payment of `paid` leaving `remaining` between interest and principal.
fn split_simple_interest(row: &mut DebtRow, paid: f64, remaining: f64) {
    if remaining == 0.0 {
        row.principal = 0.0;
        row.interest = 0.0;
    } else if row.interest > paid {
        row.interest -= paid;
    } else {
        let to_principal = paid - row.interest;
        row.interest = 0.0;
        row.principal = (row.principal - to_principal).max(0.0);
    }
}

impl ForecastSubsystem for PaymentSubsystem {
    fn name(&self) -> &'static str { "payment" }

    fn update(&mut self, ctx: &mut DayContext<'_>) -> ForecastResult<usize> {
        let ledger = ctx.ledger;
        let mut handled = 0;

        for (idx, debt) in ledger.debts.iter().enumerate() {
            let Some(payment) = &debt.payment else { continue };

            let row = ctx.projection.debt_row(idx, ctx.day)?;
            if !ctx.is_due(row.next_payment, payment.end_date) {
                continue;
            }
            let before = row.value;

            let (mut remaining, mut paid) = match payment.amount {
                PaymentAmount::Fixed(amount) => (before - amount, amount),
                PaymentAmount::PayOff        => (0.0, before),
            };
            if remaining < 0.0 {
                remaining = 0.0;
                paid = before;
            }

            let row = ctx.projection.debt_row_mut(idx, ctx.day)?;
            if debt.simple_interest_terms().is_some() {
                split_simple_interest(row, paid, remaining);
            } else if let DebtKind::Loan(_) = debt.kind {
                row.principal = remaining;
                row.interest = 0.0;
            }
            row.value = remaining;
            row.next_payment = next_occurrence(ctx.date, payment.frequency);

            let source_idx = ledger.account_index(&payment.source_account)?;
            let (src_before, src_after) = ctx.projection.adjust_account(source_idx, ctx.day, -paid)?;

            if ctx.record {
                let record = TransactionRecord::new(
                    ctx.date,
                    paid,
                    Party::balance(&payment.source_account, Verb::WithdrawnFrom, src_before, src_after),
                    Party::balance(&debt.name, Verb::PaidTo, before, remaining),
                );
                ctx.projection.log_account(source_idx, ctx.day, record.clone())?;
                ctx.projection.log_debt(idx, ctx.day, record)?;
            }
            handled += 1;
        }

        Ok(handled)
    }
}
