//! Contributions: savings accounts pull their scheduled amount from
//! their source account.
//!
//! A contribution that lifts a savings account to its goal amount ends
//! the schedule. A goal planned by date ends it through the end date.

use crate::{
    error::ForecastResult,
    event::{Party, TransactionRecord, Verb},
    recurrence::next_occurrence,
    subsystem::{DayContext, ForecastSubsystem},
};

pub struct ContributionSubsystem;

impl ForecastSubsystem for ContributionSubsystem {
    fn name(&self) -> &'static str { "contribution" }

    fn update(&mut self, ctx: &mut DayContext<'_>) -> ForecastResult<usize> {
        let ledger = ctx.ledger;
        let mut handled = 0;

        for (idx, account) in ledger.accounts.iter().enumerate() {
            let Some(terms) = account.savings_terms() else { continue };
            let Some(contribution) = &terms.contribution else { continue };

            let next = ctx.projection.account_row(idx, ctx.day)?.next_contribution;
            if !ctx.is_due(next, terms.end_date) {
                continue;
            }

            let source_idx = ledger.account_index(&terms.source_account)?;
            let amount = contribution.amount;
            let (src_before, src_after) = ctx.projection.adjust_account(source_idx, ctx.day, -amount)?;
            let (dst_before, dst_after) = ctx.projection.adjust_account(idx, ctx.day, amount)?;

            let goal_met = terms.goal.as_ref().is_some_and(|g| dst_after >= g.amount);
            let row = ctx.projection.account_row_mut(idx, ctx.day)?;
            row.next_contribution = if goal_met {
                None
            } else {
                next_occurrence(ctx.date, contribution.frequency)
            };

            if ctx.record {
                let record = TransactionRecord::new(
                    ctx.date,
                    amount,
                    Party::balance(&terms.source_account, Verb::WithdrawnFrom, src_before, src_after),
                    Party::balance(&account.name, Verb::ContributedTo, dst_before, dst_after),
                );
                ctx.projection.log_account(source_idx, ctx.day, record.clone())?;
                ctx.projection.log_account(idx, ctx.day, record)?;
            }
            handled += 1;
        }

        Ok(handled)
    }
}
