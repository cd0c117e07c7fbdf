//! Loan API Client
//!
//! Programmatic mirror of the HTTP surface: one method per operation over
//! a single reusable [`reqwest::Client`] session. No retries, no caching.
//!
//! Every failure, whether a non-2xx response or a transport fault
//! (connection refused, timeout), is surfaced as the one uniform
//! [`ClientError`], distinguished only by its message text. The message
//! carries the server-supplied `detail` when a response body is available.
//!
//! # Example
//!
//! ```rust,ignore
//! use loan_api::client::LoanClient;
//! use loan_api::types::{LoanCreate, LoanUpdate};
//!
//! let client = LoanClient::new("http://localhost:8000");
//!
//! let loan = client.create_loan(&LoanCreate {
//!     amount: 250_000.0,
//!     interest_rate: 4.5,
//!     length_months: 360,
//!     monthly_payment: 1266.71,
//! }).await?;
//!
//! let loan = client.update_loan(loan.id, &LoanUpdate {
//!     interest_rate: Some(4.25),
//!     ..Default::default()
//! }).await?;
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::types::{LoanCreate, LoanResponse, LoanUpdate};

/// Default request timeout, matching the server-side client conventions.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Uniform client-side error.
///
/// Callers needing finer-grained handling must parse the message; there is
/// deliberately no structured distinction between "unreachable" and "4xx".
#[derive(Debug, Error)]
#[error("loan API error: {message}")]
pub struct ClientError {
    pub message: String,
}

impl ClientError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::new(format!("request failed: {err}"))
    }
}

/// Response of the root health-check endpoint.
#[derive(Debug, Deserialize)]
pub struct ServerMessage {
    pub message: String,
}

/// Client for the Loan Management API.
pub struct LoanClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl LoanClient {
    /// Build a client with the default 30s request timeout.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            http: reqwest::Client::new(),
        }
    }

    /// GET / - confirm the server is running.
    pub async fn health_check(&self) -> Result<ServerMessage, ClientError> {
        let resp = self
            .http
            .get(format!("{}/", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    /// POST /loans - create a loan, returning it with its assigned id.
    pub async fn create_loan(&self, loan: &LoanCreate) -> Result<LoanResponse, ClientError> {
        let resp = self
            .http
            .post(format!("{}/loans", self.base_url))
            .timeout(self.timeout)
            .json(loan)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    /// GET /loans/{id} - fetch one loan.
    pub async fn get_loan(&self, id: i64) -> Result<LoanResponse, ClientError> {
        let resp = self
            .http
            .get(format!("{}/loans/{id}", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    /// PUT /loans/{id} - partial update; only the fields set in `patch`
    /// are transmitted, so the server leaves the rest untouched.
    pub async fn update_loan(
        &self,
        id: i64,
        patch: &LoanUpdate,
    ) -> Result<LoanResponse, ClientError> {
        let resp = self
            .http
            .put(format!("{}/loans/{id}", self.base_url))
            .timeout(self.timeout)
            .json(patch)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    /// DELETE /loans/{id} - remove a loan. A second delete of the same id
    /// fails with the server's not-found detail.
    pub async fn delete_loan(&self, id: i64) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!("{}/loans/{id}", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(resp).await)
        }
    }

    /// GET /loans?skip=&limit= - list loans in insertion order.
    pub async fn list_loans(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<LoanResponse>, ClientError> {
        let resp = self
            .http
            .get(format!("{}/loans", self.base_url))
            .timeout(self.timeout)
            .query(&[("skip", skip), ("limit", limit)])
            .send()
            .await?;
        Self::read_json(resp).await
    }

    // ============ Response Handling ============

    /// Decode a 2xx body, or turn anything else into the uniform error.
    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        if resp.status().is_success() {
            Ok(resp.json::<T>().await?)
        } else {
            Err(Self::error_from_response(resp).await)
        }
    }

    /// Extract the server's `detail` message when a body is available,
    /// falling back to the bare status.
    async fn error_from_response(resp: reqwest::Response) -> ClientError {
        let status = resp.status();
        let detail = match resp.json::<serde_json::Value>().await {
            Ok(body) => match body.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(other) => Some(other.to_string()),
                None => None,
            },
            Err(_) => None,
        };

        match detail {
            Some(detail) => ClientError::new(format!("API error: {detail}")),
            None => ClientError::new(format!("API error: HTTP {status}")),
        }
    }
}
