//! Database Module
//!
//! SQLite-backed storage handle for loan records via SQLx.
//!
//! One [`Database`] is constructed at startup, injected into the
//! application state, and closed at shutdown; there are no process-wide
//! globals. Each operation acquires a pooled connection for the duration
//! of a single query, so every incoming request is one unit of work.
//! Serialization of concurrent writes is left to the storage engine
//! (last writer wins at commit).
//!
//! Schema migration tooling is out of scope; the single `loans` table is
//! created at startup if missing.

mod models;

pub use models::Loan;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::types::{LoanCreate, LoanUpdate};

/// Storage handle: connection pool plus the loan queries.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database.
    ///
    /// # Connection Pool Settings
    ///
    /// - max_connections: 10 (adjust with traffic)
    /// - min_connections: 1 (kept warm while idle)
    /// - acquire_timeout: 3s
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context("invalid DATABASE_URL")?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create the `loans` table when it does not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS loans (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                amount          REAL    NOT NULL,
                interest_rate   REAL    NOT NULL,
                length_months   INTEGER NOT NULL,
                monthly_payment REAL    NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Close the pool. Called once at process shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Health check: one round trip to the engine.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Persist a new loan and return it with its assigned id.
    pub async fn insert_loan(&self, input: &LoanCreate) -> Result<Loan, sqlx::Error> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (amount, interest_rate, length_months, monthly_payment)
            VALUES (?, ?, ?, ?)
            RETURNING id, amount, interest_rate, length_months, monthly_payment
            "#,
        )
        .bind(input.amount)
        .bind(input.interest_rate)
        .bind(input.length_months)
        .bind(input.monthly_payment)
        .fetch_one(&self.pool)
        .await?;

        Ok(loan)
    }

    /// Look up a loan by exact id. `None` means no record matches.
    pub async fn get_loan(&self, id: i64) -> Result<Option<Loan>, sqlx::Error> {
        sqlx::query_as::<_, Loan>(
            r#"
            SELECT id, amount, interest_rate, length_months, monthly_payment
            FROM loans
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Partial update: fetch the record, overwrite exactly the fields
    /// present in `patch`, persist the merged record.
    ///
    /// `None` when the id has no matching record; storage is not written
    /// in that case.
    pub async fn update_loan(
        &self,
        id: i64,
        patch: &LoanUpdate,
    ) -> Result<Option<Loan>, sqlx::Error> {
        let Some(mut loan) = self.get_loan(id).await? else {
            return Ok(None);
        };

        if let Some(amount) = patch.amount {
            loan.amount = amount;
        }
        if let Some(rate) = patch.interest_rate {
            loan.interest_rate = rate;
        }
        if let Some(months) = patch.length_months {
            loan.length_months = months;
        }
        if let Some(payment) = patch.monthly_payment {
            loan.monthly_payment = payment;
        }

        sqlx::query(
            r#"
            UPDATE loans
            SET amount = ?, interest_rate = ?, length_months = ?, monthly_payment = ?
            WHERE id = ?
            "#,
        )
        .bind(loan.amount)
        .bind(loan.interest_rate)
        .bind(loan.length_months)
        .bind(loan.monthly_payment)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(loan))
    }

    /// Remove a loan permanently. `false` when no record matched, which is
    /// also what a second delete of the same id reports.
    pub async fn delete_loan(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM loans WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List loans in id (insertion) order, skipping `skip` records and
    /// returning at most `limit`.
    pub async fn list_loans(&self, skip: i64, limit: i64) -> Result<Vec<Loan>, sqlx::Error> {
        sqlx::query_as::<_, Loan>(
            r#"
            SELECT id, amount, interest_rate, length_months, monthly_payment
            FROM loans
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
    }

    /// Total number of stored loans.
    pub async fn count_loans(&self) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM loans")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    // Each test gets its own shared-cache in-memory database; the pool's
    // warm connection keeps it alive for the test's duration.
    static NEXT_DB: AtomicU32 = AtomicU32::new(0);

    async fn test_db() -> Database {
        let n = NEXT_DB.fetch_add(1, Ordering::Relaxed);
        let url = format!("sqlite:file:loan_db_test_{n}?mode=memory&cache=shared");
        let db = Database::connect(&url).await.unwrap();
        db.init_schema().await.unwrap();
        db
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
    async fn create_then_get_round_trips() {
        let db = test_db().await;

        let created = db.insert_loan(&sample_loan()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.amount, 250_000.0);
        assert_eq!(created.interest_rate, 4.5);
        assert_eq!(created.length_months, 360);
        assert_eq!(created.monthly_payment, 1266.71);

        let fetched = db.get_loan(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn ids_follow_insertion_order() {
        let db = test_db().await;

        for _ in 0..3 {
            db.insert_loan(&sample_loan()).await.unwrap();
        }
        let loans = db.list_loans(0, 100).await.unwrap();
        let ids: Vec<i64> = loans.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn get_missing_id_is_none() {
        let db = test_db().await;
        assert!(db.get_loan(999_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn partial_update_touches_exactly_the_named_field() {
        let db = test_db().await;
        let created = db.insert_loan(&sample_loan()).await.unwrap();

        let patch = LoanUpdate {
            interest_rate: Some(4.25),
            ..Default::default()
        };
        let updated = db.update_loan(created.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.interest_rate, 4.25);
        assert_eq!(updated.amount, created.amount);
        assert_eq!(updated.length_months, created.length_months);
        assert_eq!(updated.monthly_payment, created.monthly_payment);

        // Re-fetch: the persisted record matches what update returned.
        let fetched = db.get_loan(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn empty_update_leaves_the_record_unchanged() {
        let db = test_db().await;
        let created = db.insert_loan(&sample_loan()).await.unwrap();

        let updated = db
            .update_loan(created.id, &LoanUpdate::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn update_missing_id_is_none() {
        let db = test_db().await;
        let patch = LoanUpdate {
            amount: Some(1.0),
            ..Default::default()
        };
        assert!(db.update_loan(999_999, &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found_the_second_time() {
        let db = test_db().await;
        let created = db.insert_loan(&sample_loan()).await.unwrap();

        assert!(db.delete_loan(created.id).await.unwrap());
        assert!(!db.delete_loan(created.id).await.unwrap());
        assert!(db.get_loan(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_pagination_windows() {
        let db = test_db().await;
        for _ in 0..5 {
            db.insert_loan(&sample_loan()).await.unwrap();
        }

        let first_two = db.list_loans(0, 2).await.unwrap();
        assert_eq!(first_two.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2]);

        let tail = db.list_loans(4, 100).await.unwrap();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].id, 5);

        let past_the_end = db.list_loans(10, 100).await.unwrap();
        assert!(past_the_end.is_empty());
    }

    #[tokio::test]
    async fn count_tracks_inserts_and_deletes() {
        let db = test_db().await;
        assert_eq!(db.count_loans().await.unwrap(), 0);

        let created = db.insert_loan(&sample_loan()).await.unwrap();
        assert_eq!(db.count_loans().await.unwrap(), 1);

        db.delete_loan(created.id).await.unwrap();
        assert_eq!(db.count_loans().await.unwrap(), 0);
    }
}
