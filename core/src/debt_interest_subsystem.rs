//! Debt interest: daily accrual at rate / 365.25.
//!
//! Credit cards and generic debts compound on the whole balance.
//! Loans compound the same way, or accrue simple interest on principal.

use crate::{
    clock::add_days,
    error::ForecastResult,
    ledger::{DebtKind, InterestModel},
    subsystem::{DayContext, ForecastSubsystem},
    types::DAYS_IN_YEAR,
};

pub struct DebtInterestSubsystem;

impl ForecastSubsystem for DebtInterestSubsystem {
    fn name(&self) -> &'static str { "debt_interest" }

    fn update(&mut self, ctx: &mut DayContext<'_>) -> ForecastResult<usize> {
        let ledger = ctx.ledger;
        let mut handled = 0;

        for (idx, debt) in ledger.debts.iter().enumerate() {
            let Some(rate) = debt.interest_rate else { continue };
            let daily = rate / DAYS_IN_YEAR;

            let row = ctx.projection.debt_row_mut(idx, ctx.day)?;
            if row.next_interest != ctx.date {
                continue;
            }

            match &debt.kind {
                DebtKind::Loan(terms) if terms.model == InterestModel::Simple => {
                    let accrued = row.principal * daily;
                    row.value += accrued;
                    row.interest += accrued;
                }
                DebtKind::Loan(_) => {
                    row.value += row.value * daily;
                    row.principal = row.value;
                    row.interest = 0.0;
                }
                DebtKind::CreditCard | DebtKind::Generic => {
                    row.value *= 1.0 + daily;
                }
            }
            row.next_interest = add_days(ctx.date, 1);
            handled += 1;
        }

        Ok(handled)
    }
}
