//! THE MOST IMPORTANT TEST IN THE PROJECT.
//!
//! Two engines, same ledger, same range: byte-identical histories.
//! update(a, b) followed by update(b, c) must leave the ledger exactly as
//! update(a, c) does: same values to the bit, same schedule dates.
//! Any divergence is a blocker. Do not merge until fixed.

mod common;

use budget_forecast_core::{
    amortization::{find_goal_date_compound_interest, find_goal_date_simple_interest},
    clock::{add_days, days_between},
    ledger::{Account, Budget, BudgetItem, Debt, FundingSource, InterestModel, Ledger, Payment, RemainAction},
    recurrence::Frequency,
};
use chrono::{NaiveDate, Weekday};
use common::{date, engine, household};

fn one_shot(build: fn() -> Ledger, start: NaiveDate, end: NaiveDate) -> Ledger {
    let mut ledger = build();
    engine().update(&mut ledger, start, end).expect("one-shot update");
    ledger
}

fn chained(build: fn() -> Ledger, start: NaiveDate, cuts: &[NaiveDate], end: NaiveDate) -> Ledger {
    let mut ledger = build();
    let mut engine = engine();
    let mut from = start;
    for &cut in cuts.iter().chain(std::iter::once(&end)) {
        engine.update(&mut ledger, from, cut).expect("chained update");
        from = cut;
    }
    ledger
}

fn assert_identical(expected: &Ledger, actual: &Ledger, label: &str) {
    for (a, b) in expected.accounts.iter().zip(&actual.accounts) {
        assert_eq!(a, b, "{label}: account '{}' diverged", a.name);
    }
    for (a, b) in expected.debts.iter().zip(&actual.debts) {
        assert_eq!(a, b, "{label}: debt '{}' diverged", a.name);
    }
    for (a, b) in expected.budget.items.iter().zip(&actual.budget.items) {
        assert_eq!(a, b, "{label}: budget item '{}' diverged", a.description);
    }
    assert_eq!(expected, actual, "{label}: ledger diverged");
}

fn daily_cuts(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    (1..days_between(start, end)).map(|d| add_days(start, d)).collect()
}

fn goal_start() -> NaiveDate {
    date(2017, 1, 12)
}

/// Debts paying toward goal dates, and a budget resetting on the 31st.
fn goal_bound() -> Ledger {
    let interest_start = add_days(goal_start(), 1);

    let card_next = date(2017, 1, 20);
    let card_goal = find_goal_date_compound_interest(
        card_next, days_between(interest_start, card_next), 250.0, Frequency::Monthly, 3000.0, 0.22, None,
    )
    .expect("card is paid off");

    let loan_next = date(2017, 2, 1);
    let loan_goal = find_goal_date_simple_interest(
        loan_next, days_between(interest_start, loan_next), 300.0, Frequency::Monthly, 4000.0, 0.05, 4000.0, None,
    )
    .expect("loan is paid off");

    let mut ledger = Ledger::new();
    ledger
        .add_account(Account::checking("Checking", 20_000.0))
        .add_debt(Debt::credit_card("Visa", 3000.0, Some(0.22)).with_payment(
            Payment::fixed(250.0, Frequency::Monthly, "Checking", card_next).with_goal_date(card_goal),
        ))
        .add_debt(Debt::loan("Student", 4000.0, Some(0.05), InterestModel::Simple, 4000.0).with_payment(
            Payment::fixed(300.0, Frequency::Monthly, "Checking", loan_next).with_goal_date(loan_goal),
        ));
    ledger.set_budget(
        Budget::new(true, Weekday::Wed, 31)
            .with_item(
                BudgetItem::new("Rent fund", 900.0, Frequency::Monthly, date(2017, 1, 12), FundingSource::account("Checking"))
                    .prorated()
                    .with_remain_action(RemainAction::AddBack)
                    .with_current_amount(120.0),
            )
            .with_item(
                BudgetItem::new("Utilities", 150.0, Frequency::Monthly, date(2017, 1, 31), FundingSource::account("Checking"))
                    .with_remain_action(RemainAction::Disappear),
            )
            .with_item(
                BudgetItem::new("Fuel", 60.0, Frequency::Weekly, date(2017, 1, 12), FundingSource::account("Checking"))
                    .prorated(),
            ),
    );
    ledger
}

// ─── Test 1: two engines ───────────────────────────────────────────

#[test]
fn same_ledger_produces_identical_histories() {
    let ledger = household();
    let start = date(2017, 1, 12);
    let end = date(2018, 1, 11);

    let mut engine_a = engine();
    let mut engine_b = engine();
    engine_a.predict(&ledger, start, end).expect("engine_a predict");
    engine_b.predict(&ledger, start, end).expect("engine_b predict");

    let log_a = engine_a.projection().to_json().expect("export a");
    let log_b = engine_b.projection().to_json().expect("export b");
    assert_eq!(log_a.len(), log_b.len(), "history lengths differ: {} vs {}", log_a.len(), log_b.len());
    assert!(log_a == log_b, "histories diverged");
}

// ─── Test 2: a single cut ──────────────────────────────────────────

#[test]
fn single_cut_matches_one_shot() {
    let start = date(2017, 1, 12);
    let end = date(2017, 7, 31);
    let expected = one_shot(household, start, end);

    for cut in [date(2017, 2, 1), date(2017, 3, 1), date(2017, 3, 15), date(2017, 5, 28)] {
        let actual = chained(household, start, &[cut], end);
        assert_identical(&expected, &actual, &format!("cut at {cut}"));
    }
}

// ─── Test 3: degenerate cuts ───────────────────────────────────────

#[test]
fn cuts_at_the_edges_match_one_shot() {
    let start = date(2017, 1, 12);
    let end = date(2017, 4, 30);
    let expected = one_shot(household, start, end);

    assert_identical(&expected, &chained(household, start, &[start], end), "cut at start");
    assert_identical(&expected, &chained(household, start, &[end], end), "cut at end");
    assert_identical(&expected, &chained(household, start, &[add_days(start, 1)], end), "cut after first day");
}

// ─── Test 4: many cuts ─────────────────────────────────────────────

#[test]
fn daily_updates_match_one_shot() {
    let start = date(2017, 1, 12);
    let end = date(2017, 6, 15);
    let expected = one_shot(household, start, end);

    assert_identical(&expected, &chained(household, start, &daily_cuts(start, end), end), "daily cuts");
}

// ─── Test 5: goal-bound payments and a day-31 reset ───────────────

#[test]
fn daily_updates_keep_goal_dates_and_late_month_resets() {
    let start = goal_start();
    let end = date(2017, 8, 31);
    let expected = one_shot(goal_bound, start, end);

    assert_identical(&expected, &chained(goal_bound, start, &daily_cuts(start, end), end), "goal-bound daily cuts");

    let planned = goal_bound();
    for (before, after) in planned.debts.iter().zip(&expected.debts) {
        let planned_goal = before.payment.as_ref().unwrap().goal_date;
        assert_eq!(
            after.payment.as_ref().unwrap().goal_date,
            planned_goal,
            "goal of '{}' still follows from the committed balance",
            before.name
        );
    }
    let utilities = expected.budget.item("Utilities").unwrap();
    assert_eq!(utilities.next_loss, Some(date(2017, 9, 30)), "resets clamp to the month's last day");
}

// ─── Test 6: the run actually moved things ─────────────────────────

#[test]
fn long_run_changes_every_kind_of_entity() {
    let before = household();
    let after = one_shot(household, date(2017, 1, 12), date(2017, 7, 31));

    for (b, a) in before.accounts.iter().zip(&after.accounts) {
        assert_ne!(b.value, a.value, "account '{}' never moved", b.name);
    }
    for (b, a) in before.debts.iter().zip(&after.debts) {
        assert_ne!(b.amount, a.amount, "debt '{}' never moved", b.name);
    }
    for (b, a) in before.gains.iter().zip(&after.gains) {
        assert_ne!(b.next_deposit, a.next_deposit, "gain '{}' schedule never moved", b.description);
    }

    let vacation = after.account("Vacation").unwrap();
    assert_eq!(vacation.value, 1000.0, "vacation savings stop at the goal");
    assert_eq!(vacation.savings_terms().unwrap().next_contribution, None);

    let medical = after.debt("Medical").unwrap();
    assert_eq!(medical.amount, 0.0, "payoff clears the medical bill");
    assert_eq!(medical.payment.as_ref().unwrap().next_payment, None);
}
