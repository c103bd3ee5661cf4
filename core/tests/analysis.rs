//! Windowed cash-flow analysis over the live ledger.

mod common;

use budget_forecast_core::{
    amortization::toggle,
    analysis::{is_relevant, FlowAnalysis},
    ledger::{Account, Debt, Expense, FundingSource, Gain, Ledger, Payment, SavingsTerms, Transfer},
    recurrence::Frequency,
    types::{DAYS_IN_YEAR, MONTHS_IN_YEAR},
};
use common::{assert_close, date};

// ─── Test 1: relevance ─────────────────────────────────────────────

#[test]
fn relevance_follows_the_schedule_window() {
    let chosen = date(2017, 1, 10);
    let monthly = Frequency::Monthly;

    assert!(is_relevant(chosen, Some(date(2017, 1, 15)), None, monthly), "previous occurrence already passed");
    assert!(is_relevant(chosen, Some(date(2017, 1, 5)), None, monthly), "due before the chosen date");
    assert!(!is_relevant(chosen, Some(date(2017, 3, 15)), None, monthly), "not started yet");
    assert!(!is_relevant(chosen, Some(date(2017, 1, 5)), Some(date(2017, 1, 8)), monthly), "ended before the chosen date");
    assert!(!is_relevant(chosen, Some(date(2017, 1, 5)), Some(date(2017, 1, 4)), monthly), "ends before it is next due");
    assert!(!is_relevant(chosen, Some(date(2017, 1, 5)), None, Frequency::OneTime), "one-time amounts have no rate");
    assert!(!is_relevant(chosen, None, None, monthly), "finished schedules");
}

#[test]
fn toggle_round_trips_between_recurring_frequencies() {
    for from in Frequency::RECURRING {
        for to in Frequency::RECURRING {
            let there = toggle(123.45, from, to).unwrap();
            let back = toggle(there, to, from).unwrap();
            assert_close(back, 123.45, 1e-9, &format!("{from} -> {to} -> {from}"));
        }
    }
    assert_eq!(toggle(10.0, Frequency::OneTime, Frequency::Monthly), None);
    assert_eq!(toggle(10.0, Frequency::Monthly, Frequency::OneTime), None);
}

// ─── Test 2: aggregates ────────────────────────────────────────────

/// Everything monthly, so totals read as plain sums.
fn monthly_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .add_account(Account::checking("Checking", 2000.0))
        .add_account(Account::savings(
            "Savings",
            0.0,
            SavingsTerms::new("Checking").with_contribution(200.0, Frequency::Monthly, date(2017, 1, 1)),
        ))
        .add_debt(
            Debt::credit_card("Card", 500.0, None)
                .with_payment(Payment::fixed(150.0, Frequency::Monthly, "Checking", date(2017, 1, 20))),
        )
        .add_gain(Gain::new("Salary", 3000.0, Frequency::Monthly, date(2017, 1, 1), "Checking"))
        .add_gain(Gain::new("Gift", 500.0, Frequency::OneTime, date(2017, 1, 2), "Checking"))
        .add_expense(Expense::new("Rent", 1200.0, Frequency::Monthly, date(2017, 1, 1), FundingSource::account("Checking")))
        .add_expense(Expense::new("Streaming", 50.0, Frequency::Monthly, date(2017, 1, 15), FundingSource::credit_card("Card")))
        .add_transfer(Transfer::new("Sweep", "Checking", "Savings", 100.0, Frequency::Monthly, date(2017, 1, 25)));
    ledger
}

#[test]
fn monthly_totals_add_up() {
    let ledger = monthly_ledger();
    let today = date(2017, 1, 10);
    let analysis = FlowAnalysis::new(&ledger, Frequency::Monthly, today);

    assert_close(analysis.net_gain(), 3000.0, 1e-9, "one-time gains are excluded");
    assert_close(analysis.net_loss(), 1250.0, 1e-9, "net loss");
    assert_close(analysis.net_account_loss(), 1200.0, 1e-9, "account loss");
    assert_close(analysis.net_credit_card_loss(), 50.0, 1e-9, "card loss");
    assert_close(analysis.net_contributions(), 200.0, 1e-9, "contributions");
    assert_close(analysis.gains_minus_losses(), 1750.0, 1e-9, "gains minus losses");
    assert_close(analysis.net_payments(today, None), 150.0, 1e-9, "payments");

    assert_close(analysis.cash_flow(today, None), 3000.0 - 1200.0 - 150.0 - 200.0, 1e-9, "cash flow");
    assert_close(analysis.debt_flow(today, None), 50.0 - 150.0, 1e-9, "debt flow");
}

#[test]
fn totals_convert_to_the_analysis_frequency() {
    let ledger = monthly_ledger();
    let analysis = FlowAnalysis::new(&ledger, Frequency::Yearly, date(2017, 1, 10));
    assert_close(analysis.net_gain(), 3000.0 * MONTHS_IN_YEAR, 1e-6, "yearly salary");

    let analysis = FlowAnalysis::new(&ledger, Frequency::Daily, date(2017, 1, 10));
    assert_close(analysis.net_gain(), 3000.0 * MONTHS_IN_YEAR / DAYS_IN_YEAR, 1e-9, "daily salary");
}

#[test]
fn money_out_is_grouped_by_source() {
    let ledger = monthly_ledger();
    let today = date(2017, 1, 10);
    let out = FlowAnalysis::new(&ledger, Frequency::Monthly, today).source_money_out(today, None);

    let checking = out[&FundingSource::account("Checking")];
    assert_close(checking, 1200.0 + 200.0 + 100.0 + 150.0, 1e-9, "checking outflow");
    let card = out[&FundingSource::credit_card("Card")];
    assert_close(card, 50.0, 1e-9, "card outflow");
    assert_eq!(out.len(), 2);
}

// ─── Test 3: payments that outrun spending ─────────────────────────

#[test]
fn card_payment_drops_to_spending_after_payoff() {
    // 500 owed, 150 paid and 50 charged monthly: clear around May 20.
    let ledger = monthly_ledger();
    let today = date(2017, 1, 10);
    let card = ledger.debt("Card").unwrap();

    let early = FlowAnalysis::new(&ledger, Frequency::Monthly, today);
    assert_close(early.debt_payment(card, today, None).unwrap(), 150.0, 1e-9, "before payoff");

    let later = FlowAnalysis::new(&ledger, Frequency::Monthly, date(2017, 7, 1));
    assert_close(later.debt_payment(card, today, None).unwrap(), 50.0, 1e-9, "after payoff");
}

#[test]
fn pay_off_card_pays_its_spending() {
    let mut ledger = monthly_ledger();
    ledger.debts[0].payment = Some(Payment::pay_off(Frequency::Monthly, "Checking", date(2017, 1, 20)));
    let today = date(2017, 1, 10);
    let analysis = FlowAnalysis::new(&ledger, Frequency::Monthly, today);

    assert_close(analysis.credit_card_money_out("Card"), 50.0, 1e-9, "card spending");
    assert_close(analysis.net_payments(today, None), 50.0, 1e-9, "pay-off tracks spending");
}
