//! Loan Endpoints
//!
//! The five operations over the loan resource. Each handler is one unit
//! of work: validate the input (fail closed, nothing is written on a
//! validation failure), run exactly one storage operation, map the outcome
//! to a status code. A missing id is a normal outcome (404), not a fault.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::ApiError,
    types::{FieldViolation, LoanCreate, LoanResponse, LoanUpdate},
    AppState,
};

// ============ Query Parameters ============

/// Pagination parameters for `GET /loans`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Records to skip (default 0).
    pub skip: Option<i64>,
    /// Maximum records to return (default 100).
    pub limit: Option<i64>,
}

impl ListQuery {
    /// Resolve defaults and reject negative values.
    ///
    /// Negative skip/limit are reported through the same violation channel
    /// as body validation rather than silently clamped.
    fn resolve(&self) -> Result<(i64, i64), Vec<FieldViolation>> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(100);

        let mut violations = Vec::new();
        if skip < 0 {
            violations.push(FieldViolation {
                field: "skip".to_string(),
                message: "must be greater than or equal to 0".to_string(),
            });
        }
        if limit < 0 {
            violations.push(FieldViolation {
                field: "limit".to_string(),
                message: "must be greater than or equal to 0".to_string(),
            });
        }
        if violations.is_empty() {
            Ok((skip, limit))
        } else {
            Err(violations)
        }
    }
}

// ============ Handlers ============

/// POST /loans
///
/// Create a loan. 201 with the persisted record (including its assigned
/// id) on success, 422 with the field violations otherwise.
pub async fn create_loan(
    State(state): State<AppState>,
    Json(input): Json<LoanCreate>,
) -> Result<(StatusCode, Json<LoanResponse>), ApiError> {
    input.validate().map_err(ApiError::Validation)?;

    let loan = state.db.insert_loan(&input).await?;
    tracing::info!(id = loan.id, amount = loan.amount, "loan created");

    Ok((StatusCode::CREATED, Json(loan.into())))
}

/// GET /loans/:id
///
/// Fetch a loan by its unique identifier. 404 when no record matches.
pub async fn get_loan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LoanResponse>, ApiError> {
    match state.db.get_loan(id).await? {
        Some(loan) => Ok(Json(loan.into())),
        None => Err(ApiError::loan_not_found()),
    }
}

/// PUT /loans/:id
///
/// Partial update: only the fields present in the payload are mutated,
/// every absent field keeps its prior value. 200 with the full merged
/// record, 404 when the id has no record, 422 when a present field is out
/// of bound (nothing is written in that case).
pub async fn update_loan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<LoanUpdate>,
) -> Result<Json<LoanResponse>, ApiError> {
    patch.validate().map_err(ApiError::Validation)?;

    match state.db.update_loan(id, &patch).await? {
        Some(loan) => {
            tracing::info!(id, "loan updated");
            Ok(Json(loan.into()))
        }
        None => Err(ApiError::loan_not_found()),
    }
}

/// DELETE /loans/:id
///
/// Remove a loan permanently. 204 with an empty body on success; a second
/// delete of the same id gets 404, by design.
pub async fn delete_loan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.db.delete_loan(id).await? {
        tracing::info!(id, "loan deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::loan_not_found())
    }
}

/// GET /loans?skip=&limit=
///
/// List loans in insertion (id) order. An empty store yields an empty
/// array, not a 404.
pub async fn list_loans(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<LoanResponse>>, ApiError> {
    let (skip, limit) = query.resolve().map_err(ApiError::Validation)?;

    let loans = state.db.list_loans(skip, limit).await?;
    Ok(Json(loans.into_iter().map(LoanResponse::from).collect()))
}
