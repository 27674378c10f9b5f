//! Structured extraction
//!
//! The conversation driver (the LLM tool-call layer) has already segmented
//! field values; this strategy only validates names against the schema and
//! merges the non-empty values through as updates.

use std::collections::HashMap;
use std::sync::Arc;

use concierge_config::AgentSchema;
use concierge_core::{ExtractorInput, FieldUpdate, SlotExtraction};

/// Pass-through extractor for caller-segmented field values
pub struct StructuredExtractor {
    schema: Arc<AgentSchema>,
}

impl StructuredExtractor {
    pub fn new(schema: Arc<AgentSchema>) -> Self {
        Self { schema }
    }

    fn merge_fields(&self, fields: &HashMap<String, String>) -> Vec<FieldUpdate> {
        for name in fields.keys() {
            if self.schema.field(name).is_none() {
                tracing::debug!(field = %name, agent = %self.schema.agent, "Dropping unknown field");
            }
        }

        // Iterate in schema declaration order for deterministic output.
        self.schema
            .fields
            .iter()
            .filter_map(|def| {
                fields
                    .get(&def.name)
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(|v| FieldUpdate::new(&def.name, v))
            })
            .collect()
    }
}

impl SlotExtraction for StructuredExtractor {
    fn extract(&self, input: &ExtractorInput) -> Vec<FieldUpdate> {
        match input {
            ExtractorInput::Fields(fields) => self.merge_fields(fields),
            ExtractorInput::Utterance(_) => Vec::new(),
        }
    }
}
