//! Coffee ordering agent
//!
//! Gathers a drink order slot by slot and appends the finished order to the
//! orders store. One instance per conversation.

use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use concierge_config::{AgentSchema, CompanyConfig};
use concierge_core::{ExtractorInput, Result, SlotExtraction};
use concierge_extraction::{KeywordExtractor, StructuredExtractor};
use concierge_persistence::RecordStore;

use crate::dst::SlotTracker;

/// Session-scoped barista agent
pub struct CoffeeOrderAgent {
    tracker: SlotTracker,
    structured: StructuredExtractor,
    keyword: KeywordExtractor,
    store: Arc<dyn RecordStore>,
    persisted: bool,
    company_name: String,
}

impl CoffeeOrderAgent {
    /// New conversation against the default coffee schema
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_schema(Arc::new(AgentSchema::coffee_order()), store)
    }

    /// New conversation against a custom schema
    pub fn with_schema(schema: Arc<AgentSchema>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            tracker: SlotTracker::new(schema.clone()),
            structured: StructuredExtractor::new(schema.clone()),
            keyword: KeywordExtractor::new(schema),
            store,
            persisted: false,
            company_name: "Falcon Cafe".to_string(),
        }
    }

    /// Greet on behalf of the configured company
    pub fn with_company(mut self, company: &CompanyConfig) -> Self {
        self.company_name = company.name.clone();
        self
    }

    /// Opening line of the conversation
    pub fn greet(&self) -> String {
        format!(
            "Welcome to {}! What can I get started for you?",
            self.company_name
        )
    }

    /// Apply caller-segmented field values (the LLM tool-call path)
    ///
    /// Returns the order summary once all required slots are filled, or a
    /// question naming everything still missing.
    pub async fn update_order(&mut self, fields: HashMap<String, String>) -> Result<String> {
        let updates = self.structured.extract(&ExtractorInput::fields(fields));
        self.tracker.apply(&updates);

        if self.tracker.is_complete() {
            return self.place_order().await;
        }

        let missing: Vec<String> = self
            .tracker
            .missing_fields()
            .iter()
            .map(|f| f.replace('_', " "))
            .collect();
        Ok(format!("Could you please tell me your {}?", missing.join(", ")))
    }

    /// Scan a raw utterance for order details
    ///
    /// Returns the order summary on completion, otherwise the question for
    /// the next missing slot.
    pub async fn process_utterance(&mut self, text: &str) -> Result<String> {
        let updates = self.keyword.extract(&ExtractorInput::utterance(text));
        self.tracker.apply(&updates);

        if self.tracker.is_complete() {
            return self.place_order().await;
        }

        Ok(self
            .tracker
            .next_prompt()
            .unwrap_or("Please provide any remaining details for your order.")
            .to_string())
    }

    /// Current order state for the conversation driver
    pub fn get_order(&self) -> Value {
        self.tracker.to_record()
    }

    /// Whether every required slot is filled
    pub fn is_complete(&self) -> bool {
        self.tracker.is_complete()
    }

    async fn place_order(&mut self) -> Result<String> {
        if !self.persisted {
            let mut record = self.tracker.to_record();
            if let Some(map) = record.as_object_mut() {
                map.insert("created_at".to_string(), Value::from(Utc::now().to_rfc3339()));
            }
            self.store.append(record).await?;
            self.persisted = true;
            tracing::info!(name = %self.tracker.text("name"), "Order placed");
        }

        let extras = self.tracker.list("extras");
        let extras_part = if extras.is_empty() {
            String::new()
        } else {
            format!(", extras: {}", extras.join(", "))
        };

        Ok(format!(
            "Thank you, {}! Your order: {} {} with {} milk{} has been placed.",
            self.tracker.text("name"),
            self.tracker.text("size"),
            self.tracker.text("drink_type"),
            self.tracker.text("milk"),
            extras_part
        ))
    }
}
