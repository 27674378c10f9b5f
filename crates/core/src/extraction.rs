//! Extraction strategy abstraction
//!
//! Two strategies coexist behind one interface: structured extraction, where
//! the conversation driver has already segmented field values (the LLM
//! tool-call path), and naive keyword extraction over raw utterance text.
//! Extraction never fails; input a strategy does not recognize simply
//! produces no updates.

use std::collections::HashMap;

use crate::slots::FieldUpdate;

/// Input handed to an extraction strategy
#[derive(Debug, Clone)]
pub enum ExtractorInput {
    /// Raw utterance text from the transcription layer
    Utterance(String),
    /// Field values already segmented by the caller
    Fields(HashMap<String, String>),
}

impl ExtractorInput {
    pub fn utterance(text: impl Into<String>) -> Self {
        Self::Utterance(text.into())
    }

    pub fn fields(map: HashMap<String, String>) -> Self {
        Self::Fields(map)
    }
}

/// A strategy mapping caller input to slot updates
pub trait SlotExtraction: Send + Sync {
    /// Extract field updates from the input
    ///
    /// Absence of a recognizable value leaves the corresponding slot
    /// untouched; the returned vector may be empty.
    fn extract(&self, input: &ExtractorInput) -> Vec<FieldUpdate>;
}
