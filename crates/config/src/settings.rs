//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Storage locations for persisted records
    #[serde(default)]
    pub storage: StorageConfig,

    /// Path to the company/FAQ data file
    #[serde(default = "default_company_path")]
    pub company_data_path: String,
}

/// Storage locations, one file per agent type plus the fraud case database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON record files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Coffee orders file name
    #[serde(default = "default_orders_file")]
    pub orders_file: String,

    /// Wellness check-ins file name
    #[serde(default = "default_checkins_file")]
    pub checkins_file: String,

    /// Sales leads file name
    #[serde(default = "default_leads_file")]
    pub leads_file: String,

    /// SQLite database holding fraud cases
    #[serde(default = "default_cases_db")]
    pub cases_db: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            orders_file: default_orders_file(),
            checkins_file: default_checkins_file(),
            leads_file: default_leads_file(),
            cases_db: default_cases_db(),
        }
    }
}

impl StorageConfig {
    /// Full path for one of the JSON record files
    pub fn record_path(&self, file: &str) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(file)
    }

    /// Full path of the fraud case database
    pub fn cases_db_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(&self.cases_db)
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_orders_file() -> String {
    "orders.json".to_string()
}

fn default_checkins_file() -> String {
    "checkins.json".to_string()
}

fn default_leads_file() -> String {
    "leads.json".to_string()
}

fn default_cases_db() -> String {
    "fraud_cases.db".to_string()
}

fn default_company_path() -> String {
    "config/company.yaml".to_string()
}

/// Load settings from an optional config file plus CONCIERGE_ env overrides
pub fn load_settings(config_path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        builder = builder.add_source(File::with_name(path).required(false));
    }

    builder = builder.add_source(Environment::with_prefix("CONCIERGE").separator("__"));

    let config = builder
        .build()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.storage.data_dir, "data");
        assert_eq!(settings.storage.orders_file, "orders.json");
        assert_eq!(settings.storage.cases_db, "fraud_cases.db");
    }

    #[test]
    fn test_record_path() {
        let storage = StorageConfig::default();
        let path = storage.record_path(&storage.leads_file);
        assert!(path.ends_with("data/leads.json"));
    }

    #[test]
    fn test_load_without_file() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.storage.data_dir, "data");
    }
}
