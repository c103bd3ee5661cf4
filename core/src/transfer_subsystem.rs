//! Transfers: scheduled moves between two accounts.

use crate::{
    error::ForecastResult,
    event::{Party, TransactionRecord, Verb},
    recurrence::next_occurrence,
    subsystem::{DayContext, ForecastSubsystem},
};

pub struct TransferSubsystem;

impl ForecastSubsystem for TransferSubsystem {
    fn name(&self) -> &'static str { "transfer" }

    fn update(&mut self, ctx: &mut DayContext<'_>) -> ForecastResult<usize> {
        let ledger = ctx.ledger;
        let mut handled = 0;

        for (idx, transfer) in ledger.transfers.iter().enumerate() {
            let next = ctx.projection.transfer_row(idx, ctx.day)?.next_date;
            if !ctx.is_due(next, transfer.end_date) {
                continue;
            }
            ctx.projection.transfer_row_mut(idx, ctx.day)?.next_date = next_occurrence(ctx.date, transfer.frequency);

            let source_idx = ledger.account_index(&transfer.source)?;
            let dest_idx = ledger.account_index(&transfer.destination)?;
            let (src_before, src_after) = ctx.projection.adjust_account(source_idx, ctx.day, -transfer.amount)?;
            let (dst_before, dst_after) = ctx.projection.adjust_account(dest_idx, ctx.day, transfer.amount)?;

            if ctx.record {
                let record = TransactionRecord::new(
                    ctx.date,
                    transfer.amount,
                    Party::balance(&transfer.source, Verb::WithdrawnFrom, src_before, src_after),
                    Party::balance(&transfer.destination, Verb::DepositedTo, dst_before, dst_after),
                );
                ctx.projection.log_account(source_idx, ctx.day, record.clone())?;
                ctx.projection.log_account(dest_idx, ctx.day, record)?;
            }
            handled += 1;
        }

        Ok(handled)
    }
}
