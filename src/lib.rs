//! Loan Management API Library
//!
//! CRUD service for loan records: create, read, update, delete, and
//! paginated list over a single resource, plus a programmatic client
//! mirroring the HTTP surface.
//!
//! ## Architecture
//!
//! ```text
//! HTTP Surface (routes) -> Wire Schemas (types) -> Storage (db)
//!            ^
//!            |
//!      Client Library (client)
//! ```
//!
//! ## Modules
//!
//! - `config`: environment-variable configuration
//! - `error`: domain errors and their HTTP status mapping
//! - `types`: request/response schemas and field validation
//! - `db`: SQLite storage handle and the loan queries
//! - `routes`: HTTP endpoint handlers and router assembly
//! - `client`: programmatic client over the HTTP surface
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use loan_api::{routes, AppState, Config, Database};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database_url).await?;
//!     db.init_schema().await?;
//!
//!     let app = routes::app(AppState {
//!         db: Arc::new(db),
//!         config: Arc::new(config),
//!     });
//!     // ... bind and serve
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod types;

// Re-exports for convenience
pub use client::{ClientError, LoanClient};
pub use config::Config;
pub use db::Database;
pub use error::ApiError;

/// Application-wide state injected into every handler.
///
/// The storage handle is constructed once at startup and shared; there is
/// no other cross-request mutable state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}
