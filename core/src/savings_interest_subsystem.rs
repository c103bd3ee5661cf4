use crate::{
    error::ForecastResult,
    recurrence::{next_occurrence, Frequency},
    subsystem::{DayContext, ForecastSubsystem},
    types::MONTHS_IN_YEAR,
};

/// Savings interest: monthly compounding on the 1st at rate / 12.
pub struct SavingsInterestSubsystem;

impl ForecastSubsystem for SavingsInterestSubsystem {
    fn name(&self) -> &'static str { "savings_interest" }

    fn update(&mut self, ctx: &mut DayContext<'_>) -> ForecastResult<usize> {
        let ledger = ctx.ledger;
        let mut handled = 0;

        for (idx, account) in ledger.accounts.iter().enumerate() {
            let Some(rate) = account.savings_terms().and_then(|s| s.interest_rate) else { continue };

            let row = ctx.projection.account_row_mut(idx, ctx.day)?;
            if row.next_interest != Some(ctx.date) {
                continue;
            }
            row.value += row.value * rate / MONTHS_IN_YEAR;
            row.next_interest = next_occurrence(ctx.date, Frequency::Monthly);
            handled += 1;
        }

        Ok(handled)
    }
}
