//! Database Models
//!
//! The persisted shape of a loan. One table, all columns non-nullable.

use sqlx::FromRow;

/// A loan record as stored in the `loans` table.
///
/// The database owns the canonical copy; any value of this type held
/// outside a query is a point-in-time snapshot.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Loan {
    /// Store-assigned primary key, immutable once assigned.
    pub id: i64,

    /// Principal amount. Strictly positive.
    pub amount: f64,

    /// Interest rate in percent. Non-negative (zero allowed).
    pub interest_rate: f64,

    /// Term of the loan in months. Strictly positive.
    pub length_months: i64,

    /// Monthly payment amount. Strictly positive.
    pub monthly_payment: f64,
}
