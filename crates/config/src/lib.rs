//! Configuration for the concierge demo agents
//!
//! Supports loading configuration from:
//! - YAML files (agent slot schemas, company data)
//! - Environment variables (CONCIERGE_ prefix)
//! - Built-in defaults for the four demo agents

pub mod company;
pub mod schema;
pub mod settings;

pub use company::{CompanyConfig, FaqEntry};
pub use schema::{AgentSchema, FieldDef, FieldKind, ListPolicy};
pub use settings::{load_settings, Settings, StorageConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
