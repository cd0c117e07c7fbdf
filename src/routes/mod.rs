//! API Routes Module
//!
//! # Routes
//! - `GET    /`            - root confirmation payload
//! - `GET    /health`      - deep health check (database ping)
//! - `POST   /loans`       - create a loan
//! - `GET    /loans`       - list loans (skip/limit pagination)
//! - `GET    /loans/:id`   - fetch one loan
//! - `PUT    /loans/:id`   - partial update
//! - `DELETE /loans/:id`   - remove a loan

pub mod health;
pub mod loans;

use axum::{
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Assemble the application router.
///
/// Lives in the library (not the binary) so integration tests can build
/// the exact app the server runs.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::read_root))
        .route("/health", get(health::health_check))
        .route("/loans", get(loans::list_loans).post(loans::create_loan))
        .route(
            "/loans/:id",
            get(loans::get_loan)
                .put(loans::update_loan)
                .delete(loans::delete_loan),
        )
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&state))
        .with_state(state)
}

/// CORS policy: locked to `ALLOWED_ORIGINS` in production, permissive in
/// development.
fn build_cors(state: &AppState) -> CorsLayer {
    if state.config.is_production() {
        let allowed_origins =
            std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| String::new());
        let origins: Vec<axum::http::HeaderValue> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    } else {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    }
}
