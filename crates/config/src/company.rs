//! Company and FAQ data
//!
//! Agents greet and answer on behalf of a configured company. When the data
//! file is absent a minimal default is synthesized and written back so the
//! caller never fails on first run.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One FAQ entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Company data shared across the demo agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// Display name used in greetings and summaries
    pub name: String,
    /// Short tagline, optional
    #[serde(default)]
    pub tagline: Option<String>,
    /// FAQ entries
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Falcon Cafe".to_string(),
            tagline: None,
            faq: vec![FaqEntry {
                question: "What are your opening hours?".to_string(),
                answer: "We're open from 8 AM to 8 PM, every day.".to_string(),
            }],
        }
    }
}

impl CompanyConfig {
    /// Load the company data, synthesizing a default file when absent
    ///
    /// An unreadable or unparsable file is logged and replaced by the
    /// in-memory default without touching the file on disk.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            let default = Self::default();
            if let Err(e) = default.write_to(path) {
                tracing::warn!(path = %path.display(), error = %e, "Could not write default company data");
            } else {
                tracing::info!(path = %path.display(), "Synthesized default company data");
            }
            return default;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Malformed company data, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read company data, using defaults");
                Self::default()
            }
        }
    }

    fn write_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, yaml)
    }

    /// Look up an FAQ answer by exact question match, case-insensitive
    pub fn faq_answer(&self, question: &str) -> Option<&str> {
        self.faq
            .iter()
            .find(|e| e.question.eq_ignore_ascii_case(question.trim()))
            .map(|e| e.answer.as_str())
    }
}
