use crate::{
    error::ForecastResult,
    event::{Party, TransactionRecord, Verb},
    recurrence::next_occurrence,
    subsystem::{DayContext, ForecastSubsystem},
};

/// Gains deposit into their destination account.
pub struct IncomeSubsystem;

impl ForecastSubsystem for IncomeSubsystem {
    fn name(&self) -> &'static str { "income" }

    fn update(&mut self, ctx: &mut DayContext<'_>) -> ForecastResult<usize> {
        let ledger = ctx.ledger;
        let mut handled = 0;

        for (idx, gain) in ledger.gains.iter().enumerate() {
            let next = ctx.projection.gain_row(idx, ctx.day)?.next_date;
            if !ctx.is_due(next, gain.end_date) {
                continue;
            }
            ctx.projection.gain_row_mut(idx, ctx.day)?.next_date = next_occurrence(ctx.date, gain.frequency);

            let dest_idx = ledger.account_index(&gain.destination)?;
            let (before, after) = ctx.projection.adjust_account(dest_idx, ctx.day, gain.amount)?;
            if ctx.record {
                ctx.projection.log_account(dest_idx, ctx.day, TransactionRecord::new(
                    ctx.date,
                    gain.amount,
                    Party::label(&gain.description, Verb::From),
                    Party::balance(&gain.destination, Verb::DepositedTo, before, after),
                ))?;
            }
            handled += 1;
        }

        Ok(handled)
    }
}
