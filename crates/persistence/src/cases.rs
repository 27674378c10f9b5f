//! Fraud case persistence using SQLite
//!
//! Cases are pre-seeded, read-mostly rows: looked up by customer name,
//! mutated only through a single status-transition operation, never deleted.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::PersistenceError;

/// Review status of a fraud case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    PendingReview,
    ConfirmedSafe,
    ConfirmedFraud,
    VerificationFailed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::ConfirmedSafe => "confirmed_safe",
            Self::ConfirmedFraud => "confirmed_fraud",
            Self::VerificationFailed => "verification_failed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "confirmed_safe" => Self::ConfirmedSafe,
            "confirmed_fraud" => Self::ConfirmedFraud,
            "verification_failed" => Self::VerificationFailed,
            _ => Self::PendingReview,
        }
    }
}

/// One flagged transaction awaiting customer confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudCase {
    pub id: i64,
    pub customer_name: String,
    pub security_identifier: String,
    pub security_question: String,
    pub security_answer: String,
    /// Last four digits of the card
    pub card_ending: String,
    pub status: CaseStatus,
    pub merchant: String,
    pub amount: f64,
    pub transaction_time: String,
    pub category: String,
    pub source: String,
    pub location: String,
    pub outcome: String,
    pub verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Fraud case store
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Most recently created pending case for a name, case-insensitive
    async fn find_pending_by_name(&self, name: &str)
        -> Result<Option<FraudCase>, PersistenceError>;

    /// Case by primary id
    async fn get(&self, id: i64) -> Result<Option<FraudCase>, PersistenceError>;

    /// Single-row status transition, stamping the updated-at timestamp
    async fn update_status(
        &self,
        id: i64,
        status: CaseStatus,
        outcome: &str,
        verified: bool,
    ) -> Result<(), PersistenceError>;

    /// All pending cases, most recent first
    async fn list_pending(&self) -> Result<Vec<FraudCase>, PersistenceError>;
}

const CASE_COLUMNS: &str = "id, customer_name, security_identifier, security_question, \
     security_answer, card_ending, status, merchant, amount, transaction_time, \
     category, source, location, outcome, verified, created_at, updated_at";

/// SQLite implementation of [`CaseStore`]
///
/// One conversation touches the store at a time; the connection sits behind
/// a mutex and queries run synchronously.
pub struct SqliteCaseStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCaseStore {
    /// Open (or create) the case database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path.as_ref())?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.ensure_schema()?;
        store.seed_if_empty()?;
        Ok(store)
    }

    /// In-memory database, used by tests
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.ensure_schema()?;
        store.seed_if_empty()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<(), PersistenceError> {
        self.conn.lock().execute_batch(
            "CREATE TABLE IF NOT EXISTS fraud_cases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_name TEXT NOT NULL,
                security_identifier TEXT NOT NULL,
                security_question TEXT NOT NULL,
                security_answer TEXT NOT NULL,
                card_ending TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending_review',
                merchant TEXT NOT NULL,
                amount REAL NOT NULL,
                transaction_time TEXT NOT NULL,
                category TEXT NOT NULL,
                source TEXT NOT NULL,
                location TEXT NOT NULL,
                outcome TEXT NOT NULL DEFAULT '',
                verified INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )?;
        Ok(())
    }

    /// Insert the sample cases when the table is empty
    fn seed_if_empty(&self) -> Result<(), PersistenceError> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM fraud_cases", [], |r| r.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let samples: [(&str, &str, &str, &str, &str, &str, f64, &str, &str, &str, &str); 4] = [
            (
                "John Doe",
                "JD12345",
                "What is your mother's maiden name?",
                "Smith",
                "4242",
                "ABC Electronics Ltd",
                15999.00,
                "2025-11-27 02:30:00",
                "Electronics",
                "alibaba.com",
                "Shanghai, China",
            ),
            (
                "Priya Sharma",
                "PS67890",
                "What city were you born in?",
                "Mumbai",
                "8765",
                "Luxury Fashion Store",
                45000.00,
                "2025-11-27 03:15:00",
                "Fashion",
                "luxuryboutique.eu",
                "Paris, France",
            ),
            (
                "Raj Kumar",
                "RK45678",
                "What is your favorite color?",
                "Blue",
                "3456",
                "Tech Gadgets International",
                28500.00,
                "2025-11-26 23:45:00",
                "Electronics",
                "techgadgets.cn",
                "Shenzhen, China",
            ),
            (
                "Ananya Patel",
                "AP98765",
                "What is your pet's name?",
                "Max",
                "7890",
                "Online Gaming Platform",
                12000.00,
                "2025-11-27 01:00:00",
                "Gaming",
                "gamepro.io",
                "Singapore",
            ),
        ];

        let now = Utc::now().to_rfc3339();
        for (name, ident, question, answer, card, merchant, amount, time, category, source, location) in
            samples
        {
            conn.execute(
                "INSERT INTO fraud_cases (
                    customer_name, security_identifier, security_question, security_answer,
                    card_ending, status, merchant, amount, transaction_time,
                    category, source, location, outcome, verified, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, 'pending_review', ?6, ?7, ?8, ?9, ?10, ?11, '', 0, ?12, ?12)",
                params![name, ident, question, answer, card, merchant, amount, time, category, source, location, now],
            )?;
        }

        tracing::info!(count = samples.len(), "Seeded fraud case database");
        Ok(())
    }
}

fn row_to_case(row: &Row<'_>) -> rusqlite::Result<FraudCase> {
    let status: String = row.get(6)?;
    Ok(FraudCase {
        id: row.get(0)?,
        customer_name: row.get(1)?,
        security_identifier: row.get(2)?,
        security_question: row.get(3)?,
        security_answer: row.get(4)?,
        card_ending: row.get(5)?,
        status: CaseStatus::from_str(&status),
        merchant: row.get(7)?,
        amount: row.get(8)?,
        transaction_time: row.get(9)?,
        category: row.get(10)?,
        source: row.get(11)?,
        location: row.get(12)?,
        outcome: row.get(13)?,
        verified: row.get(14)?,
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
    })
}

#[async_trait]
impl CaseStore for SqliteCaseStore {
    async fn find_pending_by_name(
        &self,
        name: &str,
    ) -> Result<Option<FraudCase>, PersistenceError> {
        let conn = self.conn.lock();
        let query = format!(
            "SELECT {} FROM fraud_cases
             WHERE LOWER(customer_name) = LOWER(?1) AND status = 'pending_review'
             ORDER BY created_at DESC, id DESC LIMIT 1",
            CASE_COLUMNS
        );
        let case = conn
            .query_row(&query, params![name], row_to_case)
            .optional()?;
        Ok(case)
    }

    async fn get(&self, id: i64) -> Result<Option<FraudCase>, PersistenceError> {
        let conn = self.conn.lock();
        let query = format!("SELECT {} FROM fraud_cases WHERE id = ?1", CASE_COLUMNS);
        let case = conn.query_row(&query, params![id], row_to_case).optional()?;
        Ok(case)
    }

    async fn update_status(
        &self,
        id: i64,
        status: CaseStatus,
        outcome: &str,
        verified: bool,
    ) -> Result<(), PersistenceError> {
        let conn = self.conn.lock();
        let updated = conn.execute(
            "UPDATE fraud_cases SET status = ?1, outcome = ?2, verified = ?3, updated_at = ?4
             WHERE id = ?5",
            params![status.as_str(), outcome, verified, Utc::now().to_rfc3339(), id],
        )?;

        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("case {}", id)));
        }

        tracing::info!(case_id = id, status = status.as_str(), "Case status updated");
        Ok(())
    }

    async fn list_pending(&self) -> Result<Vec<FraudCase>, PersistenceError> {
        let conn = self.conn.lock();
        let query = format!(
            "SELECT {} FROM fraud_cases WHERE status = 'pending_review'
             ORDER BY created_at DESC, id DESC",
            CASE_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let cases = stmt
            .query_map([], row_to_case)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_cases_are_pending() {
        let store = SqliteCaseStore::open_in_memory().unwrap();
        let pending = store.list_pending().await.unwrap();
        assert_eq!(pending.len(), 4);
        assert!(pending.iter().all(|c| c.status == CaseStatus::PendingReview));
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let store = SqliteCaseStore::open_in_memory().unwrap();
        let case = store.find_pending_by_name("john doe").await.unwrap().unwrap();
        assert_eq!(case.customer_name, "John Doe");
        assert_eq!(case.card_ending, "4242");
        assert_eq!(case.security_answer, "Smith");
    }

    #[tokio::test]
    async fn test_lookup_unknown_name() {
        let store = SqliteCaseStore::open_in_memory().unwrap();
        assert!(store.find_pending_by_name("Nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_status_excludes_case_from_lookup() {
        let store = SqliteCaseStore::open_in_memory().unwrap();
        let case = store.find_pending_by_name("John Doe").await.unwrap().unwrap();

        store
            .update_status(case.id, CaseStatus::ConfirmedSafe, "Customer confirmed", true)
            .await
            .unwrap();

        assert!(store.find_pending_by_name("John Doe").await.unwrap().is_none());

        let updated = store.get(case.id).await.unwrap().unwrap();
        assert_eq!(updated.status, CaseStatus::ConfirmedSafe);
        assert_eq!(updated.outcome, "Customer confirmed");
        assert!(updated.verified);
        assert_ne!(updated.updated_at, case.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_case_is_not_found() {
        let store = SqliteCaseStore::open_in_memory().unwrap();
        let err = store
            .update_status(9999, CaseStatus::ConfirmedFraud, "", false)
            .await
            .unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.db");

        {
            let store = SqliteCaseStore::open(&path).unwrap();
            assert_eq!(store.list_pending().await.unwrap().len(), 4);
        }

        let reopened = SqliteCaseStore::open(&path).unwrap();
        assert_eq!(reopened.list_pending().await.unwrap().len(), 4);
    }

    #[test]
    fn test_status_conversion() {
        assert_eq!(CaseStatus::from_str("confirmed_fraud"), CaseStatus::ConfirmedFraud);
        assert_eq!(CaseStatus::ConfirmedFraud.as_str(), "confirmed_fraud");
        assert_eq!(CaseStatus::from_str("garbage"), CaseStatus::PendingReview);
    }
}
