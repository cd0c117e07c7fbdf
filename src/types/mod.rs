//! Wire Schemas
//!
//! Request/response shapes for the loan resource, shared by the HTTP
//! handlers and the client library. One canonical field set, three views:
//!
//! - [`LoanCreate`]: all four business fields required
//! - [`LoanUpdate`]: all four optional (partial update)
//! - [`LoanResponse`]: the four fields plus the store-assigned id
//!
//! Validation here is pure: it never touches storage, and a handler
//! rejects the request before any database call when it fails.

use serde::{Deserialize, Serialize};

use crate::db::Loan;

/// A single violated field bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

// ============ Field Bounds ============
//
// amount > 0, interest_rate >= 0, length_months > 0, monthly_payment > 0.
// No cross-field consistency: amount/rate/months/payment are never checked
// against each other arithmetically.

fn check_amount(amount: f64, out: &mut Vec<FieldViolation>) {
    if !(amount > 0.0) {
        out.push(FieldViolation::new("amount", "must be greater than 0"));
    }
}

fn check_interest_rate(rate: f64, out: &mut Vec<FieldViolation>) {
    if !(rate >= 0.0) {
        out.push(FieldViolation::new(
            "interest_rate",
            "must be greater than or equal to 0",
        ));
    }
}

fn check_length_months(months: i64, out: &mut Vec<FieldViolation>) {
    if months <= 0 {
        out.push(FieldViolation::new(
            "length_months",
            "must be greater than 0",
        ));
    }
}

fn check_monthly_payment(payment: f64, out: &mut Vec<FieldViolation>) {
    if !(payment > 0.0) {
        out.push(FieldViolation::new(
            "monthly_payment",
            "must be greater than 0",
        ));
    }
}

// ============ Request Shapes ============

/// Body of `POST /loans`. All fields required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCreate {
    pub amount: f64,
    pub interest_rate: f64,
    pub length_months: i64,
    pub monthly_payment: f64,
}

impl LoanCreate {
    /// Check every field bound, collecting all violations.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();
        check_amount(self.amount, &mut violations);
        check_interest_rate(self.interest_rate, &mut violations);
        check_length_months(self.length_months, &mut violations);
        check_monthly_payment(self.monthly_payment, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Body of `PUT /loans/{id}`. Any subset of the four fields.
///
/// Fields left as `None` are never serialized, so a client built from this
/// type transmits exactly the fields the caller set, and the server mutates
/// exactly the fields present in the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_months: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
}

impl LoanUpdate {
    /// Check the bounds of the fields that are present.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();
        if let Some(amount) = self.amount {
            check_amount(amount, &mut violations);
        }
        if let Some(rate) = self.interest_rate {
            check_interest_rate(rate, &mut violations);
        }
        if let Some(months) = self.length_months {
            check_length_months(months, &mut violations);
        }
        if let Some(payment) = self.monthly_payment {
            check_monthly_payment(payment, &mut violations);
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// True when no field is present at all.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.interest_rate.is_none()
            && self.length_months.is_none()
            && self.monthly_payment.is_none()
    }
}

// ============ Response Shape ============

/// A loan as returned to callers: the persisted record including its id.
///
/// Built from a [`Loan`] snapshot; trusted output, never re-validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResponse {
    pub id: i64,
    pub amount: f64,
    pub interest_rate: f64,
    pub length_months: i64,
    pub monthly_payment: f64,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            id: loan.id,
            amount: loan.amount,
            interest_rate: loan.interest_rate,
            length_months: loan.length_months,
            monthly_payment: loan.monthly_payment,
        }
    }
}
