//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use budget_forecast_core::{
    engine::ForecastEngine,
    ledger::{
        Account, Budget, BudgetItem, Debt, Expense, FundingSource, Gain, InterestModel, Ledger,
        Payment, RemainAction, SavingsTerms, Transfer,
    },
    recurrence::Frequency,
};
use chrono::{NaiveDate, Weekday};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn engine() -> ForecastEngine {
    init_logging();
    ForecastEngine::build_test()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// A ledger touching every entity kind and every handler.
pub fn household() -> Ledger {
    let mut ledger = Ledger::new();

    ledger
        .add_account(Account::checking("Checking", 2500.0))
        .add_account(Account::savings(
            "Savings",
            1000.0,
            SavingsTerms::new("Checking")
                .with_contribution(75.0, Frequency::Weekly, date(2017, 1, 13))
                .with_interest(0.02),
        ))
        .add_account(Account::savings(
            "Vacation",
            0.0,
            SavingsTerms::new("Checking")
                .with_contribution(200.0, Frequency::Monthly, date(2017, 1, 31))
                .with_goal(1000.0, None),
        ));

    ledger
        .add_debt(
            Debt::credit_card("Visa", 800.0, Some(0.1899))
                .with_payment(Payment::fixed(150.0, Frequency::Monthly, "Checking", date(2017, 1, 25))),
        )
        .add_debt(
            Debt::loan("Student", 12_000.0, Some(0.045), InterestModel::Simple, 11_500.0)
                .with_payment(Payment::fixed(180.0, Frequency::Monthly, "Checking", date(2017, 2, 1))),
        )
        .add_debt(
            Debt::loan("Car", 9000.0, Some(0.039), InterestModel::Compound, 9000.0)
                .with_payment(Payment::fixed(250.0, Frequency::Monthly, "Checking", date(2017, 1, 15))),
        )
        .add_debt(
            Debt::generic("Medical", 600.0, None)
                .with_payment(Payment::pay_off(Frequency::OneTime, "Checking", date(2017, 3, 3))),
        );

    ledger
        .add_gain(Gain::new("Paycheck", 1400.0, Frequency::BiWeekly, date(2017, 1, 13), "Checking"))
        .add_gain(Gain::new("Bonus", 2000.0, Frequency::OneTime, date(2017, 3, 15), "Savings"));

    ledger
        .add_expense(Expense::new("Rent", 1100.0, Frequency::Monthly, date(2017, 2, 1), FundingSource::account("Checking")))
        .add_expense(Expense::new("Streaming", 15.99, Frequency::Monthly, date(2017, 1, 20), FundingSource::credit_card("Visa")))
        .add_expense(
            Expense::new("Gym", 40.0, Frequency::Monthly, date(2017, 1, 12), FundingSource::account("Checking"))
                .with_end_date(date(2017, 5, 1)),
        );

    ledger.add_transfer(Transfer::new("Rainy day", "Checking", "Savings", 50.0, Frequency::BiWeekly, date(2017, 1, 20)));

    ledger.set_budget(
        Budget::new(true, Weekday::Sun, 1)
            .with_item(
                BudgetItem::new("Groceries", 120.0, Frequency::Weekly, date(2017, 1, 12), FundingSource::credit_card("Visa"))
                    .prorated()
                    .with_remain_action(RemainAction::AddBack)
                    .with_current_amount(30.0),
            )
            .with_item(
                BudgetItem::new("Dining", 200.0, Frequency::Monthly, date(2017, 1, 12), FundingSource::account("Checking"))
                    .prorated()
                    .with_remain_action(RemainAction::Accumulate),
            )
            .with_item(
                BudgetItem::new("Coffee", 4.0, Frequency::Daily, date(2017, 1, 12), FundingSource::credit_card("Visa"))
                    .with_remain_action(RemainAction::Disappear)
                    .with_current_amount(4.0),
            )
            .with_item(
                BudgetItem::new("Gifts", 300.0, Frequency::Yearly, date(2017, 1, 12), FundingSource::account("Checking"))
                    .prorated(),
            ),
    );

    ledger
}
