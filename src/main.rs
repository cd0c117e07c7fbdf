//! Loan Management API Server
//!
//! Bootstrap sequence: environment, logging, configuration, storage,
//! router, serve. The storage handle is opened here, injected into the
//! application state, and closed when the server loop exits.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loan_api::{routes, AppState, Config, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // RUST_LOG=debug,sqlx=warn style filtering
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting Loan Management API Server");

    let config = Config::from_env()?;
    tracing::info!("📋 Configuration loaded");

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("🗄️  Database connected");

    db.init_schema().await?;
    tracing::info!("📦 Schema ready");

    let db = Arc::new(db);
    let state = AppState {
        db: Arc::clone(&db),
        config: Arc::new(config.clone()),
    };

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🌐 Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    // Release the pool once the server loop exits.
    db.close().await;

    Ok(())
}
