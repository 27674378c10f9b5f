//! Agent slot schema configuration
//!
//! Defines the declaration-ordered slot schemas the agents fill during a
//! conversation. Schemas can be loaded from YAML; built-in definitions cover
//! the four demo agents. Field declaration order is significant: missing
//! fields are reported, and prompted for, in that order.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Whether a slot holds one text value or an ordered list of tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    List,
}

/// Merge policy for list-valued slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListPolicy {
    /// New tokens replace the stored list (coffee extras, wellness objectives)
    #[default]
    Overwrite,
    /// New tokens extend the stored list, skipping duplicates (lead notes)
    Append,
}

/// Definition for a single slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Slot name
    pub name: String,
    /// Question to ask when this slot is the next missing one
    #[serde(default)]
    pub prompt: String,
    /// Required slots must be non-empty for the conversation to complete
    #[serde(default)]
    pub required: bool,
    /// Text or list
    #[serde(default)]
    pub kind: FieldKind,
    /// Merge policy, only meaningful for list slots
    #[serde(default)]
    pub list_policy: ListPolicy,
    /// Keyword vocabulary for naive extraction, in candidate order
    #[serde(default)]
    pub vocabulary: Vec<String>,
    /// Regex with one capture group, tried against the raw utterance
    #[serde(default)]
    pub pattern: Option<String>,
    /// Apply the "my name is" / "for" utterance heuristics to this slot
    #[serde(default)]
    pub name_heuristic: bool,
}

impl FieldDef {
    /// New text slot
    pub fn text(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            required: false,
            kind: FieldKind::Text,
            list_policy: ListPolicy::Overwrite,
            vocabulary: Vec::new(),
            pattern: None,
            name_heuristic: false,
        }
    }

    /// New list slot with the given merge policy
    pub fn list(name: impl Into<String>, prompt: impl Into<String>, policy: ListPolicy) -> Self {
        Self {
            kind: FieldKind::List,
            list_policy: policy,
            ..Self::text(name, prompt)
        }
    }

    /// Mark the slot as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the keyword vocabulary (candidate order preserved)
    pub fn vocabulary(mut self, terms: &[&str]) -> Self {
        self.vocabulary = terms.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set the extraction regex (one capture group)
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Enable the fragile name heuristics for this slot
    pub fn name_heuristic(mut self) -> Self {
        self.name_heuristic = true;
        self
    }
}

/// Declaration-ordered slot schema for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSchema {
    /// Agent identifier (e.g. "coffee_order")
    pub agent: String,
    /// Slot definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl AgentSchema {
    /// Load a schema from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound(format!("{}: {}", path.as_ref().display(), e))
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Look up a field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Required field names, in declaration order
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Schema for the coffee ordering demo
    pub fn coffee_order() -> Self {
        Self {
            agent: "coffee_order".to_string(),
            fields: vec![
                FieldDef::text("drink_type", "What drink would you like?")
                    .required()
                    .vocabulary(&[
                        "latte",
                        "cappuccino",
                        "americano",
                        "espresso",
                        "mocha",
                        "coffee",
                    ]),
                FieldDef::text("size", "What size do you prefer?")
                    .required()
                    .vocabulary(&["small", "medium", "large"]),
                FieldDef::text("milk", "What milk would you like?")
                    .required()
                    .vocabulary(&["whole", "skim", "oat", "soy", "almond"]),
                FieldDef::list(
                    "extras",
                    "Any extras like caramel or whipped cream?",
                    ListPolicy::Overwrite,
                )
                .vocabulary(&["vanilla", "caramel", "hazelnut", "whipped cream", "chocolate"]),
                FieldDef::text("name", "What name should I put on your order?")
                    .required()
                    .name_heuristic(),
            ],
        }
    }

    /// Schema for the wellness check-in demo
    pub fn wellness_checkin() -> Self {
        Self {
            agent: "wellness_checkin".to_string(),
            fields: vec![
                FieldDef::text("name", "Who am I checking in with today?")
                    .required()
                    .name_heuristic(),
                FieldDef::text("mood", "How are you feeling today?")
                    .required()
                    .vocabulary(&[
                        "great", "good", "okay", "fine", "tired", "stressed", "anxious", "calm",
                        "happy", "sad",
                    ]),
                FieldDef::text("energy_level", "How is your energy, low, medium, or high?")
                    .required()
                    .vocabulary(&["low", "medium", "high"]),
                FieldDef::list(
                    "objectives",
                    "Any goals for today, like exercise or meditation?",
                    ListPolicy::Overwrite,
                )
                .vocabulary(&[
                    "exercise",
                    "meditation",
                    "hydration",
                    "sleep",
                    "reading",
                    "walking",
                ]),
            ],
        }
    }

    /// Schema for the sales-lead capture demo
    pub fn sales_lead() -> Self {
        Self {
            agent: "sales_lead".to_string(),
            fields: vec![
                FieldDef::text("name", "May I have your name?")
                    .required()
                    .name_heuristic(),
                FieldDef::text("phone", "What's the best phone number to reach you?")
                    .required()
                    .pattern(r"\b(\d{10})\b"),
                FieldDef::text("company", "Which company are you with?"),
                FieldDef::text("interest", "Are you interested in a demo, pricing, or a trial?")
                    .required()
                    .vocabulary(&["demo", "pricing", "trial", "partnership"]),
                // Notes accumulate across the conversation rather than
                // overwriting; this divergence from the other list slots is
                // intentional.
                FieldDef::list("notes", "Anything else I should pass along?", ListPolicy::Append),
            ],
        }
    }
}
