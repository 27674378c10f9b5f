//! Sales-lead capture agent
//!
//! Collects contact details and interest from a prospect and appends the
//! finished lead to the leads store. Notes accumulate across the
//! conversation (append policy) instead of overwriting.

use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use concierge_config::AgentSchema;
use concierge_core::{ExtractorInput, Result, SlotExtraction};
use concierge_extraction::{KeywordExtractor, StructuredExtractor};
use concierge_persistence::RecordStore;

use crate::dst::SlotTracker;

/// Session-scoped lead capture agent
pub struct LeadCaptureAgent {
    tracker: SlotTracker,
    structured: StructuredExtractor,
    keyword: KeywordExtractor,
    store: Arc<dyn RecordStore>,
    lead_id: Option<String>,
}

impl LeadCaptureAgent {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let schema = Arc::new(AgentSchema::sales_lead());
        Self {
            tracker: SlotTracker::new(schema.clone()),
            structured: StructuredExtractor::new(schema.clone()),
            keyword: KeywordExtractor::new(schema),
            store,
            lead_id: None,
        }
    }

    /// Apply caller-segmented field values
    ///
    /// Returns the hand-off line once the lead is complete, or a question
    /// naming everything still missing.
    pub async fn update_lead(&mut self, fields: HashMap<String, String>) -> Result<String> {
        let updates = self.structured.extract(&ExtractorInput::fields(fields));
        self.tracker.apply(&updates);

        if self.tracker.is_complete() {
            return self.capture().await;
        }

        let missing: Vec<String> = self
            .tracker
            .missing_fields()
            .iter()
            .map(|f| f.replace('_', " "))
            .collect();
        Ok(format!("Could you share your {}?", missing.join(", ")))
    }

    /// Scan a raw utterance for lead details
    pub async fn process_utterance(&mut self, text: &str) -> Result<String> {
        let updates = self.keyword.extract(&ExtractorInput::utterance(text));
        self.tracker.apply(&updates);

        if self.tracker.is_complete() {
            return self.capture().await;
        }

        Ok(self
            .tracker
            .next_prompt()
            .unwrap_or("Could you share a few more details?")
            .to_string())
    }

    /// Current lead state for the conversation driver
    pub fn get_lead(&self) -> Value {
        self.tracker.to_record()
    }

    /// Lead id, assigned once the lead has been captured
    pub fn lead_id(&self) -> Option<&str> {
        self.lead_id.as_deref()
    }

    async fn capture(&mut self) -> Result<String> {
        if self.lead_id.is_none() {
            let lead_id = format!(
                "LEAD-{}",
                uuid::Uuid::new_v4().to_string()[..8].to_uppercase()
            );

            let mut record = self.tracker.to_record();
            if let Some(map) = record.as_object_mut() {
                map.insert("lead_id".to_string(), Value::from(lead_id.clone()));
                map.insert("created_at".to_string(), Value::from(Utc::now().to_rfc3339()));
            }
            self.store.append(record).await?;

            tracing::info!(lead_id = %lead_id, name = %self.tracker.text("name"), "Lead captured");
            self.lead_id = Some(lead_id);
        }

        Ok(format!(
            "Thanks, {}! I've noted your interest in {}. Our team will reach out at {} shortly.",
            self.tracker.text("name"),
            self.tracker.text("interest"),
            self.tracker.text("phone")
        ))
    }
}
