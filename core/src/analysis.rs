//! Windowed analysis: live obligations normalized to one frequency.
//!
//! Reads the live ledger only (typically right after an update). Every
//! aggregate sums `toggle(amount, native, target)` over obligations that
//! are still relevant as of the chosen date.

use crate::{
    amortization::{find_goal_date_compound_interest, toggle},
    clock::days_between,
    ledger::{Debt, FundingSource, Ledger, PaymentAmount, Scheduled},
    recurrence::{previous_occurrence, Frequency},
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Whether a recurring obligation counts toward an analysis as of `chosen`.
///
/// It must have a next date and a recurring frequency, not end before its
/// next date, not end before `chosen`, and either be due by `chosen` or
/// have had its previous occurrence by `chosen`.
pub fn is_relevant(
    chosen: NaiveDate,
    next: Option<NaiveDate>,
    end: Option<NaiveDate>,
    frequency: Frequency,
) -> bool {
    let Some(next) = next else { return false };
    if end.is_some_and(|end| end < next) {
        return false;
    }
    let Some(previous) = previous_occurrence(next, frequency) else { return false };

    let valid_end = end.map_or(true, |end| end >= chosen);
    let valid_next = next <= chosen || previous <= chosen;
    valid_end && valid_next
}

pub struct FlowAnalysis<'a> {
    ledger:    &'a Ledger,
    frequency: Frequency,
    chosen:    NaiveDate,
}

impl<'a> FlowAnalysis<'a> {
    pub fn new(ledger: &'a Ledger, frequency: Frequency, chosen: NaiveDate) -> Self {
        Self { ledger, frequency, chosen }
    }

    fn relevant(&self, item: &dyn Scheduled) -> bool {
        is_relevant(self.chosen, item.next_date(), item.end_date(), item.frequency())
    }

    /// Amount of `item` at `frequency`, if it is relevant.
    fn amount_at(&self, item: &dyn Scheduled, frequency: Frequency) -> Option<f64> {
        if !self.relevant(item) {
            return None;
        }
        toggle(item.amount(), item.frequency(), frequency)
    }

    /// Expenses and budget items with their funding source.
    fn losses(&self) -> impl Iterator<Item = (&'a FundingSource, &'a dyn Scheduled)> {
        let ledger = self.ledger;
        let expenses = ledger.expenses.iter()
            .map(|e| (&e.source, e as &dyn Scheduled));
        let items = ledger.budget.items.iter()
            .map(|i| (&i.source, i as &dyn Scheduled));
        expenses.chain(items)
    }

    fn sum_losses(&self, keep: impl Fn(&FundingSource) -> bool) -> f64 {
        self.losses()
            .filter(|&(source, _)| keep(source))
            .filter_map(|(_, item)| self.amount_at(item, self.frequency))
            .sum()
    }

    pub fn net_gain(&self) -> f64 {
        self.ledger.gains.iter()
            .filter_map(|g| self.amount_at(g, self.frequency))
            .sum()
    }

    pub fn net_loss(&self) -> f64 {
        self.sum_losses(|_| true)
    }

    pub fn net_account_loss(&self) -> f64 {
        self.sum_losses(|s| matches!(s, FundingSource::Account(_)))
    }

    pub fn net_credit_card_loss(&self) -> f64 {
        self.sum_losses(|s| matches!(s, FundingSource::CreditCard(_)))
    }

    pub fn net_contributions(&self) -> f64 {
        self.contributions().map(|(_, amount)| amount).sum()
    }

    /// Relevant contributions with the account they are drawn from.
    fn contributions(&self) -> impl Iterator<Item = (&'a str, f64)> + '_ {
        let ledger = self.ledger;
        ledger.accounts.iter().filter_map(move |account| {
            let terms = account.savings_terms()?;
            let contribution = terms.contribution.as_ref()?;
            if !is_relevant(self.chosen, terms.next_contribution, terms.end_date, contribution.frequency) {
                return None;
            }
            let amount = toggle(contribution.amount, contribution.frequency, self.frequency)?;
            Some((terms.source_account.as_str(), amount))
        })
    }

    /// Spending charged to one credit card, at `frequency`.
    fn card_spending_at(&self, card: &str, frequency: Frequency) -> f64 {
        self.losses()
            .filter(|&(source, _)| matches!(source, FundingSource::CreditCard(name) if name == card))
            .filter_map(|(_, item)| self.amount_at(item, frequency))
            .sum()
    }

    pub fn credit_card_money_out(&self, card: &str) -> f64 {
        self.card_spending_at(card, self.frequency)
    }

    /// One debt's payment at the analysis frequency, or None if it has
    /// no relevant payment.
    ///
    /// A fixed payment on a card whose spending is smaller than the
    /// payment will eventually only cover that spending. Once the payoff
    /// search says the balance is gone by `chosen`, only the spending counts.
    pub fn debt_payment(&self, debt: &Debt, today: NaiveDate, limit: Option<NaiveDate>) -> Option<f64> {
        let payment = debt.payment.as_ref()?;
        if !is_relevant(self.chosen, payment.next_payment, payment.end_date, payment.frequency) {
            return None;
        }

        let amount = match payment.amount {
            PaymentAmount::PayOff if debt.is_credit_card() => self.credit_card_money_out(&debt.name),
            PaymentAmount::PayOff => 0.0,
            PaymentAmount::Fixed(amount) => {
                let spending = if debt.is_credit_card() {
                    self.card_spending_at(&debt.name, payment.frequency)
                } else {
                    0.0
                };
                let mut effective = amount;
                if spending < amount && payment.goal_date.is_none() {
                    let switch = payment.next_payment.and_then(|next| {
                        find_goal_date_compound_interest(
                            next,
                            days_between(today, next),
                            amount - spending,
                            payment.frequency,
                            debt.amount,
                            debt.interest_rate.unwrap_or(0.0),
                            limit,
                        )
                    });
                    if switch.is_some_and(|switch| switch < self.chosen) {
                        effective = spending;
                    }
                }
                toggle(effective, payment.frequency, self.frequency)?
            }
        };
        Some(amount)
    }

    pub fn net_payments(&self, today: NaiveDate, limit: Option<NaiveDate>) -> f64 {
        self.ledger.debts.iter()
            .filter_map(|d| self.debt_payment(d, today, limit))
            .sum()
    }

    pub fn gains_minus_losses(&self) -> f64 {
        self.net_gain() - self.net_loss()
    }

    /// Money into accounts less money out of them.
    pub fn cash_flow(&self, today: NaiveDate, limit: Option<NaiveDate>) -> f64 {
        self.net_gain()
            - self.net_account_loss()
            - self.net_payments(today, limit)
            - self.net_contributions()
    }

    /// Growth of credit card balances: new spending less payments.
    pub fn debt_flow(&self, today: NaiveDate, limit: Option<NaiveDate>) -> f64 {
        self.net_credit_card_loss() - self.net_payments(today, limit)
    }

    /// Outflow per funding source: losses, contributions, transfers out
    /// and debt payments.
    pub fn source_money_out(&self, today: NaiveDate, limit: Option<NaiveDate>) -> BTreeMap<FundingSource, f64> {
        let mut out: BTreeMap<FundingSource, f64> = BTreeMap::new();

        for (source, item) in self.losses() {
            if let Some(amount) = self.amount_at(item, self.frequency) {
                *out.entry(source.clone()).or_default() += amount;
            }
        }
        for (account, amount) in self.contributions() {
            *out.entry(FundingSource::account(account)).or_default() += amount;
        }
        for transfer in &self.ledger.transfers {
            if let Some(amount) = self.amount_at(transfer, self.frequency) {
                *out.entry(FundingSource::account(&transfer.source)).or_default() += amount;
            }
        }
        for debt in &self.ledger.debts {
            if let (Some(amount), Some(payment)) = (self.debt_payment(debt, today, limit), &debt.payment) {
                *out.entry(FundingSource::account(&payment.source_account)).or_default() += amount;
            }
        }
        out
    }
}
