//! End-to-end tests: the real router served over a local socket, driven
//! through the client library (which doubles as the client's own test).

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use loan_api::config::{Config, Environment};
use loan_api::types::{LoanCreate, LoanUpdate};
use loan_api::{routes, AppState, Database, LoanClient};

static NEXT_DB: AtomicU32 = AtomicU32::new(0);

struct TestApp {
    base_url: String,
}

/// Spawn the app on an ephemeral port with its own in-memory database.
async fn start_server() -> anyhow::Result<TestApp> {
    let n = NEXT_DB.fetch_add(1, Ordering::Relaxed);
    let database_url = format!("sqlite:file:loan_api_e2e_{n}?mode=memory&cache=shared");

    let db = Database::connect(&database_url).await?;
    db.init_schema().await?;

    let config = Config {
        port: 0,
        database_url,
        environment: Environment::Development,
    };

    let app = routes::app(AppState {
        db: Arc::new(db),
        config: Arc::new(config),
    });

    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });

    Ok(TestApp { base_url })
}

fn sample_loan() -> LoanCreate {
    LoanCreate {
        amount: 250_000.0,
        interest_rate: 4.5,
        length_months: 360,
        monthly_payment: 1266.71,
    }
}

#[tokio::test]
async fn root_returns_fixed_confirmation() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = LoanClient::new(&app.base_url);

    let health = client.health_check().await?;
    assert_eq!(health.message, "Loan Management API is running");
    Ok(())
}

#[tokio::test]
async fn deep_health_check_reports_database() -> anyhow::Result<()> {
    let app = start_server().await?;

    let body: serde_json::Value = reqwest::get(format!("{}/health", app.base_url))
        .await?
        .json()
        .await?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["connected"], true);
    Ok(())
}

#[tokio::test]
async fn create_get_update_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = LoanClient::new(&app.base_url);

    let created = client.create_loan(&sample_loan()).await?;
    assert_eq!(created.id, 1);
    assert_eq!(created.amount, 250_000.0);
    assert_eq!(created.interest_rate, 4.5);
    assert_eq!(created.length_months, 360);
    assert_eq!(created.monthly_payment, 1266.71);

    let fetched = client.get_loan(created.id).await?;
    assert_eq!(fetched, created);

    // Update only the interest rate; everything else must survive.
    let updated = client
        .update_loan(
            created.id,
            &LoanUpdate {
                interest_rate: Some(4.25),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.id, 1);
    assert_eq!(updated.interest_rate, 4.25);
    assert_eq!(updated.amount, 250_000.0);
    assert_eq!(updated.length_months, 360);
    assert_eq!(updated.monthly_payment, 1266.71);

    let refetched = client.get_loan(created.id).await?;
    assert_eq!(refetched, updated);
    Ok(())
}

#[tokio::test]
async fn invalid_creates_are_rejected_and_persist_nothing() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = LoanClient::new(&app.base_url);

    let invalid_inputs = [
        LoanCreate { amount: 0.0, ..sample_loan() },
        LoanCreate { interest_rate: -1.0, ..sample_loan() },
        LoanCreate { length_months: 0, ..sample_loan() },
        LoanCreate { monthly_payment: -5.0, ..sample_loan() },
    ];

    for input in &invalid_inputs {
        let err = client.create_loan(input).await.unwrap_err();
        assert!(err.message.contains("API error"), "got: {}", err.message);
    }

    // Fail closed: nothing was written.
    assert!(client.list_loans(0, 100).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_returns_201_and_validation_failure_422() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = reqwest::Client::new();

    let resp = http
        .post(format!("{}/loans", app.base_url))
        .json(&sample_loan())
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let resp = http
        .post(format!("{}/loans", app.base_url))
        .json(&serde_json::json!({
            "amount": -1.0,
            "interest_rate": 4.5,
            "length_months": 360,
            "monthly_payment": 1266.71,
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["detail"][0]["field"], "amount");
    Ok(())
}

#[tokio::test]
async fn missing_ids_yield_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = LoanClient::new(&app.base_url);

    let err = client.get_loan(999_999).await.unwrap_err();
    assert!(err.message.contains("Loan not found"), "got: {}", err.message);

    let err = client
        .update_loan(
            999_999,
            &LoanUpdate {
                interest_rate: Some(1.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.message.contains("Loan not found"), "got: {}", err.message);

    let err = client.delete_loan(999_999).await.unwrap_err();
    assert!(err.message.contains("Loan not found"), "got: {}", err.message);
    Ok(())
}

#[tokio::test]
async fn delete_succeeds_once_then_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = LoanClient::new(&app.base_url);

    let created = client.create_loan(&sample_loan()).await?;

    // First delete: 204 with an empty body.
    let resp = reqwest::Client::new()
        .delete(format!("{}/loans/{}", app.base_url, created.id))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);
    assert!(resp.bytes().await?.is_empty());

    // Second delete of the same id: not found, by design.
    let err = client.delete_loan(created.id).await.unwrap_err();
    assert!(err.message.contains("Loan not found"), "got: {}", err.message);
    Ok(())
}

#[tokio::test]
async fn list_pagination_in_insertion_order() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = LoanClient::new(&app.base_url);

    for _ in 0..5 {
        client.create_loan(&sample_loan()).await?;
    }

    let first_two = client.list_loans(0, 2).await?;
    assert_eq!(first_two.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2]);

    let tail = client.list_loans(4, 100).await?;
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].id, 5);
    Ok(())
}

#[tokio::test]
async fn negative_pagination_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = LoanClient::new(&app.base_url);

    let err = client.list_loans(-1, 100).await.unwrap_err();
    assert!(err.message.contains("skip"), "got: {}", err.message);

    let err = client.list_loans(0, -1).await.unwrap_err();
    assert!(err.message.contains("limit"), "got: {}", err.message);
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_the_same_uniform_error() {
    // Nothing listens on the discard port.
    let client = LoanClient::with_timeout("http://127.0.0.1:9", Duration::from_secs(1));

    let err = client.health_check().await.unwrap_err();
    assert!(err.message.contains("request failed"), "got: {}", err.message);
}
