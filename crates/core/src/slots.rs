//! Slot value and field update types
//!
//! A conversation fills a fixed set of named slots. Values are either a
//! single text value or an ordered list of tokens; list-valued slots are
//! normalized the same way everywhere (comma split, trim, drop empties and
//! the literal "none" sentinel).

use serde::{Deserialize, Serialize};

/// A single slot value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Text(String),
    List(Vec<String>),
}

impl SlotValue {
    /// Empty values never satisfy a required slot
    pub fn is_empty(&self) -> bool {
        match self {
            SlotValue::Text(s) => s.trim().is_empty(),
            SlotValue::List(items) => items.is_empty(),
        }
    }

    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Text(s) => Some(s.as_str()),
            SlotValue::List(_) => None,
        }
    }

    /// List content, if this is a list value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SlotValue::Text(_) => None,
            SlotValue::List(items) => Some(items.as_slice()),
        }
    }
}

impl std::fmt::Display for SlotValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotValue::Text(s) => write!(f, "{}", s),
            SlotValue::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

/// A proposed change to a single slot
///
/// The value is carried as raw text; list-valued slots accept a
/// comma-separated string and are normalized when applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    /// Slot name the update targets
    pub field: String,
    /// Raw value as supplied by the extraction strategy
    pub value: String,
}

impl FieldUpdate {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Normalize a raw list value into tokens
///
/// Splits on commas, trims whitespace, discards empty tokens and the literal
/// "none" sentinel (case-insensitive), and de-duplicates while preserving
/// first-seen order.
pub fn normalize_list_tokens(raw: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let token = part.trim();
        if token.is_empty() || token.eq_ignore_ascii_case("none") {
            continue;
        }
        if !tokens.iter().any(|t| t.eq_ignore_ascii_case(token)) {
            tokens.push(token.to_string());
        }
    }
    tokens
}
