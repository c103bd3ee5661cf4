use crate::{
    error::ForecastResult,
    recurrence::next_occurrence,
    subsystem::{DayContext, ForecastSubsystem},
};

/// Standalone recurring expenses drawn from their funding source.
pub struct ExpenseSubsystem;

impl ForecastSubsystem for ExpenseSubsystem {
    fn name(&self) -> &'static str { "expense" }

    fn update(&mut self, ctx: &mut DayContext<'_>) -> ForecastResult<usize> {
        let ledger = ctx.ledger;
        let mut handled = 0;

        for (idx, expense) in ledger.expenses.iter().enumerate() {
            let next = ctx.projection.expense_row(idx, ctx.day)?.next_date;
            if !ctx.is_due(next, expense.end_date) {
                continue;
            }
            ctx.projection.expense_row_mut(idx, ctx.day)?.next_date = next_occurrence(ctx.date, expense.frequency);

            ctx.projection.apply_loss(
                ledger,
                &expense.source,
                &expense.description,
                expense.amount,
                None,
                ctx.day,
                ctx.record,
            )?;
            handled += 1;
        }

        Ok(handled)
    }
}
