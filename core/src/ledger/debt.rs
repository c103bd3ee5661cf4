use crate::{recurrence::Frequency, types::EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Debts ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub name:          EntityId,
    pub amount:        f64,
    /// Annual rate. None means the debt never accrues; Some(0.0) accrues nothing.
    pub interest_rate: Option<f64>,
    pub kind:          DebtKind,
    pub payment:       Option<Payment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DebtKind {
    Generic,
    CreditCard,
    Loan(LoanTerms),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestModel {
    /// Interest accrues on the outstanding principal only.
    Simple,
    /// Interest accrues on the whole balance, daily.
    Compound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub model:     InterestModel,
    pub principal: f64,
    /// Accrued interest not yet paid. Always 0 for compound loans.
    pub interest:  f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentAmount {
    Fixed(f64),
    /// Pay whatever the balance is on the payment day.
    PayOff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub amount:         PaymentAmount,
    pub frequency:      Frequency,
    pub source_account: EntityId,
    pub next_payment:   Option<NaiveDate>,
    pub end_date:       Option<NaiveDate>,
    /// Date the fixed payment is expected to retire the debt.
    pub goal_date:      Option<NaiveDate>,
}

impl Payment {
    pub fn fixed(amount: f64, frequency: Frequency, source_account: &str, next_payment: NaiveDate) -> Self {
        Self {
            amount:         PaymentAmount::Fixed(amount),
            frequency,
            source_account: source_account.to_string(),
            next_payment:   Some(next_payment),
            end_date:       None,
            goal_date:      None,
        }
    }

    pub fn pay_off(frequency: Frequency, source_account: &str, next_payment: NaiveDate) -> Self {
        Self {
            amount: PaymentAmount::PayOff,
            ..Self::fixed(0.0, frequency, source_account, next_payment)
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Goal-targeted payment: it stops on the goal date.
    pub fn with_goal_date(mut self, goal_date: NaiveDate) -> Self {
        self.goal_date = Some(goal_date);
        self.end_date = Some(goal_date);
        self
    }

    pub fn fixed_amount(&self) -> Option<f64> {
        match self.amount {
            PaymentAmount::Fixed(amount) => Some(amount),
            PaymentAmount::PayOff        => None,
        }
    }
}

impl Debt {
    pub fn generic(name: &str, amount: f64, interest_rate: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            amount,
            interest_rate,
            kind: DebtKind::Generic,
            payment: None,
        }
    }

    pub fn credit_card(name: &str, amount: f64, interest_rate: Option<f64>) -> Self {
        Self { kind: DebtKind::CreditCard, ..Self::generic(name, amount, interest_rate) }
    }

    /// A loan. For a simple-interest loan with a rate, `principal` below
    /// `amount` marks the difference as already-accrued interest.
    pub fn loan(
        name: &str,
        amount: f64,
        interest_rate: Option<f64>,
        model: InterestModel,
        principal: f64,
    ) -> Self {
        let terms = match (model, interest_rate) {
            (InterestModel::Simple, Some(_)) if principal < amount => LoanTerms {
                model,
                principal,
                interest: amount - principal,
            },
            _ => LoanTerms { model, principal: amount, interest: 0.0 },
        };
        Self { kind: DebtKind::Loan(terms), ..Self::generic(name, amount, interest_rate) }
    }

    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn is_credit_card(&self) -> bool {
        matches!(self.kind, DebtKind::CreditCard)
    }

    /// Loan terms when the debt splits payments between interest and principal.
    pub fn simple_interest_terms(&self) -> Option<&LoanTerms> {
        match (&self.kind, self.interest_rate) {
            (DebtKind::Loan(terms), Some(_)) if terms.model == InterestModel::Simple => Some(terms),
            _ => None,
        }
    }
}
