//! Seed the database with sample loan data.
//!
//! Populates the configured database with five realistic loans for testing
//! and demonstration. Skips seeding when data already exists.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loan_api::{types::LoanCreate, Config, Database};

fn sample_loans() -> Vec<LoanCreate> {
    vec![
        LoanCreate {
            amount: 250_000.0,
            interest_rate: 4.5,
            length_months: 360,
            monthly_payment: 1266.71,
        },
        LoanCreate {
            amount: 500_000.0,
            interest_rate: 3.75,
            length_months: 360,
            monthly_payment: 2315.10,
        },
        LoanCreate {
            amount: 150_000.0,
            interest_rate: 5.0,
            length_months: 180,
            monthly_payment: 1186.19,
        },
        LoanCreate {
            amount: 75_000.0,
            interest_rate: 4.25,
            length_months: 240,
            monthly_payment: 459.88,
        },
        LoanCreate {
            amount: 1_000_000.0,
            interest_rate: 3.5,
            length_months: 360,
            monthly_payment: 4490.44,
        },
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let db = Database::connect(&config.database_url).await?;
    db.init_schema().await?;

    let existing = db.count_loans().await?;
    if existing > 0 {
        tracing::info!(existing, "database already has loans, skipping seed");
        return Ok(());
    }

    for input in sample_loans() {
        let loan = db.insert_loan(&input).await?;
        tracing::info!(
            id = loan.id,
            amount = loan.amount,
            interest_rate = loan.interest_rate,
            length_months = loan.length_months,
            monthly_payment = loan.monthly_payment,
            "seeded loan"
        );
    }

    tracing::info!("✓ seeded {} sample loans", sample_loans().len());

    db.close().await;
    Ok(())
}
