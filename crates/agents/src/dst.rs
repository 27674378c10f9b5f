//! Slot state tracking
//!
//! One [`SlotTracker`] exists per conversation. It records slot values
//! against the agent schema, decides completeness, and picks the next
//! missing field to prompt for.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use concierge_config::{AgentSchema, FieldKind, ListPolicy};
use concierge_core::{normalize_list_tokens, FieldUpdate, SlotValue};

/// Session-scoped slot state plus completion policy
pub struct SlotTracker {
    schema: Arc<AgentSchema>,
    values: HashMap<String, SlotValue>,
}

impl SlotTracker {
    /// Create an empty tracker for the given schema
    pub fn new(schema: Arc<AgentSchema>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
        }
    }

    /// Schema backing this tracker
    pub fn schema(&self) -> &AgentSchema {
        &self.schema
    }

    /// Apply field updates, returning how many were applied
    ///
    /// Only fields present and non-empty in the updates are touched; an
    /// empty value never clears a previously set slot. Unknown fields are
    /// logged and skipped. List slots are normalized and merged per their
    /// declared policy.
    pub fn apply(&mut self, updates: &[FieldUpdate]) -> usize {
        let mut applied = 0;

        for update in updates {
            let raw = update.value.trim();
            if raw.is_empty() {
                continue;
            }

            let Some(def) = self.schema.field(&update.field) else {
                tracing::debug!(field = %update.field, agent = %self.schema.agent, "Ignoring unknown field");
                continue;
            };

            match def.kind {
                FieldKind::Text => {
                    self.values
                        .insert(def.name.clone(), SlotValue::Text(raw.to_string()));
                }
                FieldKind::List => {
                    let tokens = normalize_list_tokens(raw);
                    match def.list_policy {
                        // "none" normalizes to an empty token list and
                        // clears the slot on overwrite.
                        ListPolicy::Overwrite => {
                            self.values.insert(def.name.clone(), SlotValue::List(tokens));
                        }
                        ListPolicy::Append => {
                            if tokens.is_empty() {
                                continue;
                            }
                            let entry = self
                                .values
                                .entry(def.name.clone())
                                .or_insert_with(|| SlotValue::List(Vec::new()));
                            if let SlotValue::List(existing) = entry {
                                for token in tokens {
                                    if !existing.iter().any(|t| t.eq_ignore_ascii_case(&token)) {
                                        existing.push(token);
                                    }
                                }
                            }
                        }
                    }
                }
            }

            tracing::debug!(field = %def.name, value = %raw, "Slot updated");
            applied += 1;
        }

        applied
    }

    /// True iff every required field is non-empty
    pub fn is_complete(&self) -> bool {
        self.schema
            .fields
            .iter()
            .filter(|f| f.required)
            .all(|f| self.values.get(&f.name).is_some_and(|v| !v.is_empty()))
    }

    /// Required fields still empty or absent, in declaration order
    pub fn missing_fields(&self) -> Vec<&str> {
        self.schema
            .fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| !self.values.get(&f.name).is_some_and(|v| !v.is_empty()))
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Question for the first missing field, if any
    pub fn next_prompt(&self) -> Option<&str> {
        let first = self.missing_fields().into_iter().next()?;
        self.schema.field(first).map(|f| f.prompt.as_str())
    }

    /// Current value for a slot
    pub fn value(&self, name: &str) -> Option<&SlotValue> {
        self.values.get(name)
    }

    /// Text content of a slot, empty string when unset
    pub fn text(&self, name: &str) -> &str {
        self.values
            .get(name)
            .and_then(|v| v.as_text())
            .unwrap_or("")
    }

    /// List content of a slot, empty when unset
    pub fn list(&self, name: &str) -> &[String] {
        self.values.get(name).and_then(|v| v.as_list()).unwrap_or(&[])
    }

    /// Serialize every schema field for persistence
    ///
    /// Unset text slots render as empty strings and unset list slots as
    /// empty arrays, so all records in a store share one shape.
    pub fn to_record(&self) -> Value {
        let mut record = serde_json::Map::new();
        for field in &self.schema.fields {
            let value = match (field.kind, self.values.get(&field.name)) {
                (FieldKind::Text, Some(SlotValue::Text(s))) => json!(s),
                (FieldKind::Text, _) => json!(""),
                (FieldKind::List, Some(SlotValue::List(items))) => json!(items),
                (FieldKind::List, _) => json!([]),
            };
            record.insert(field.name.clone(), value);
        }
        Value::Object(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> SlotTracker {
        SlotTracker::new(Arc::new(AgentSchema::coffee_order()))
    }

    #[test]
    fn test_fresh_state_missing_all_required() {
        let t = tracker();
        assert!(!t.is_complete());
        assert_eq!(t.missing_fields(), vec!["drink_type", "size", "milk", "name"]);
    }

    #[test]
    fn test_complete_iff_required_filled() {
        let mut t = tracker();
        t.apply(&[
            FieldUpdate::new("drink_type", "latte"),
            FieldUpdate::new("size", "medium"),
            FieldUpdate::new("milk", "oat"),
        ]);
        assert!(!t.is_complete());

        t.apply(&[FieldUpdate::new("name", "alice")]);
        assert!(t.is_complete());
        assert!(t.missing_fields().is_empty());
    }

    #[test]
    fn test_optional_list_never_blocks_completion() {
        let mut t = tracker();
        t.apply(&[
            FieldUpdate::new("drink_type", "latte"),
            FieldUpdate::new("size", "medium"),
            FieldUpdate::new("milk", "oat"),
            FieldUpdate::new("name", "alice"),
        ]);
        assert!(t.is_complete());
        assert!(t.list("extras").is_empty());
    }

    #[test]
    fn test_empty_update_never_clears() {
        let mut t = tracker();
        t.apply(&[FieldUpdate::new("size", "large")]);
        t.apply(&[FieldUpdate::new("size", "  ")]);
        assert_eq!(t.text("size"), "large");
    }

    #[test]
    fn test_scalar_update_is_idempotent() {
        let mut t = tracker();
        t.apply(&[FieldUpdate::new("size", "large")]);
        t.apply(&[FieldUpdate::new("size", "large")]);
        assert_eq!(t.text("size"), "large");
        assert_eq!(t.missing_fields(), vec!["drink_type", "milk", "name"]);
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut t = tracker();
        assert_eq!(t.apply(&[FieldUpdate::new("temperature", "hot")]), 0);
    }

    #[test]
    fn test_overwrite_list_policy() {
        let mut t = tracker();
        t.apply(&[FieldUpdate::new("extras", "caramel, vanilla")]);
        assert_eq!(t.list("extras"), ["caramel", "vanilla"]);

        t.apply(&[FieldUpdate::new("extras", "chocolate")]);
        assert_eq!(t.list("extras"), ["chocolate"]);

        // The "none" sentinel clears the list.
        t.apply(&[FieldUpdate::new("extras", "none")]);
        assert!(t.list("extras").is_empty());
    }

    #[test]
    fn test_append_list_policy_is_order_dependent() {
        let mut t = SlotTracker::new(Arc::new(AgentSchema::sales_lead()));
        t.apply(&[FieldUpdate::new("notes", "wants q3 rollout")]);
        t.apply(&[FieldUpdate::new("notes", "budget approved, wants q3 rollout")]);
        assert_eq!(t.list("notes"), ["wants q3 rollout", "budget approved"]);
    }

    #[test]
    fn test_record_shape() {
        let mut t = tracker();
        t.apply(&[
            FieldUpdate::new("drink_type", "latte"),
            FieldUpdate::new("extras", "caramel"),
        ]);
        let record = t.to_record();
        assert_eq!(record["drink_type"], "latte");
        assert_eq!(record["size"], "");
        assert_eq!(record["extras"], json!(["caramel"]));
    }

    #[test]
    fn test_next_prompt_follows_declaration_order() {
        let mut t = tracker();
        assert_eq!(t.next_prompt(), Some("What drink would you like?"));

        t.apply(&[FieldUpdate::new("drink_type", "latte")]);
        assert_eq!(t.next_prompt(), Some("What size do you prefer?"));
    }
}
