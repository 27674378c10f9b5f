//! Persistence layer for the concierge demo agents
//!
//! Provides durable storage for:
//! - Completed conversation records (JSON array files, one per agent type)
//! - Fraud cases (SQLite table with seeded sample data)

pub mod cases;
pub mod error;
pub mod records;

pub use cases::{CaseStatus, CaseStore, FraudCase, SqliteCaseStore};
pub use error::PersistenceError;
pub use records::{JsonFileStore, RecordStore};
