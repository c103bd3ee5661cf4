//! Envelope resets: budget items refill on their reset dates.
//!
//! On reset the item's loss (prorated if configured) is drawn from its
//! source, and the tracked remainder moves per the remain action:
//!
//!   accumulate  remainder += loss
//!   disappear   remainder  = loss
//!   add-back    prior remainder returns to the source, remainder = loss
//!
//! Under RemainMode::AssumeSpent every item acts as disappear.

use crate::{
    envelope::{next_reset, prorate},
    error::ForecastResult,
    ledger::RemainAction,
    subsystem::{DayContext, ForecastSubsystem, RemainMode},
};

pub struct EnvelopeSubsystem;

impl ForecastSubsystem for EnvelopeSubsystem {
    fn name(&self) -> &'static str { "envelope" }

    fn update(&mut self, ctx: &mut DayContext<'_>) -> ForecastResult<usize> {
        let ledger = ctx.ledger;
        let budget = &ledger.budget;
        let mut handled = 0;

        for (idx, item) in budget.items.iter().enumerate() {
            let row = ctx.projection.envelope_row(idx, ctx.day)?;
            if !ctx.is_due(row.next_reset, item.end_date) {
                continue;
            }
            let prior = row.original_remaining;

            let loss = if item.prorated_start {
                prorate(budget, item.frequency, item.amount, ctx.date)
            } else {
                item.amount
            };

            let action = match ctx.remain_mode {
                RemainMode::AssumeSpent => RemainAction::Disappear,
                RemainMode::Honor       => item.remain_action,
            };
            let (add_back, remaining) = match action {
                RemainAction::Accumulate => (None, prior + loss),
                RemainAction::Disappear  => (None, loss),
                RemainAction::AddBack    => (Some(prior), loss),
            };

            ctx.projection.apply_loss(
                ledger,
                &item.source,
                &item.description,
                loss,
                add_back,
                ctx.day,
                ctx.record,
            )?;

            let row = ctx.projection.envelope_row_mut(idx, ctx.day)?;
            row.updated_remaining = remaining;
            row.next_reset = next_reset(budget, item.frequency, ctx.date);
            row.loss_today = Some(loss);
            handled += 1;
        }

        Ok(handled)
    }
}
