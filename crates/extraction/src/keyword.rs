//! Rule-based keyword extraction
//!
//! Scans raw utterance text against per-field vocabularies from the agent
//! schema. The rule table is derived from configuration rather than
//! hard-coded conditionals, so swapping in structured extraction changes
//! nothing about the state-tracking contract.

use regex::Regex;
use std::sync::Arc;

use concierge_config::{AgentSchema, FieldKind};
use concierge_core::{ExtractorInput, FieldUpdate, SlotExtraction};

/// Naive keyword extractor over raw utterances
///
/// For text slots, the first vocabulary term found in candidate order wins
/// and overwrites any prior value. For list slots, every matching term is
/// collected. The name heuristics scan for "my name is" and "for" and take
/// the next whitespace-delimited token after the last occurrence; both
/// heuristics run unconditionally, so "for" overwrites "my name is" within
/// one utterance. This is known to be fragile and is kept as-is.
pub struct KeywordExtractor {
    schema: Arc<AgentSchema>,
    /// Compiled per-field regex rules, (field name, pattern)
    patterns: Vec<(String, Regex)>,
}

impl KeywordExtractor {
    /// Build the rule table from an agent schema
    pub fn new(schema: Arc<AgentSchema>) -> Self {
        let mut patterns = Vec::new();
        for field in &schema.fields {
            if let Some(ref raw) = field.pattern {
                match Regex::new(raw) {
                    Ok(re) => patterns.push((field.name.clone(), re)),
                    Err(e) => {
                        tracing::warn!(field = %field.name, error = %e, "Skipping invalid extraction pattern");
                    }
                }
            }
        }
        Self { schema, patterns }
    }

    fn scan_utterance(&self, text: &str) -> Vec<FieldUpdate> {
        let lower = text.to_lowercase();
        let mut updates = Vec::new();

        for field in &self.schema.fields {
            if !field.vocabulary.is_empty() {
                match field.kind {
                    FieldKind::Text => {
                        if let Some(term) =
                            field.vocabulary.iter().find(|term| lower.contains(term.as_str()))
                        {
                            updates.push(FieldUpdate::new(&field.name, term));
                        }
                    }
                    FieldKind::List => {
                        let found: Vec<&str> = field
                            .vocabulary
                            .iter()
                            .filter(|term| lower.contains(term.as_str()))
                            .map(|term| term.as_str())
                            .collect();
                        if !found.is_empty() {
                            updates.push(FieldUpdate::new(&field.name, found.join(", ")));
                        }
                    }
                }
            }

            if let Some((_, re)) = self.patterns.iter().find(|(name, _)| *name == field.name) {
                if let Some(caps) = re.captures(&lower) {
                    if let Some(m) = caps.get(1) {
                        updates.push(FieldUpdate::new(&field.name, m.as_str()));
                    }
                }
            }

            if field.name_heuristic {
                if let Some(name) = extract_name(&lower) {
                    updates.push(FieldUpdate::new(&field.name, name));
                }
            }
        }

        updates
    }
}

/// The "my name is" / "for" heuristics
///
/// Each marker is matched against its last occurrence in the utterance and
/// the following whitespace-delimited token is taken; the "for" result wins
/// when both markers are present. A marker with no following token is
/// ignored.
fn extract_name(lower: &str) -> Option<String> {
    let mut name = None;
    for marker in ["my name is", "for"] {
        if let Some(idx) = lower.rfind(marker) {
            let rest = &lower[idx + marker.len()..];
            if let Some(token) = rest.split_whitespace().next() {
                name = Some(token.to_string());
            }
        }
    }
    name
}

impl SlotExtraction for KeywordExtractor {
    fn extract(&self, input: &ExtractorInput) -> Vec<FieldUpdate> {
        match input {
            ExtractorInput::Utterance(text) => self.scan_utterance(text),
            ExtractorInput::Fields(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee_extractor() -> KeywordExtractor {
        KeywordExtractor::new(Arc::new(AgentSchema::coffee_order()))
    }

    fn value_of<'a>(updates: &'a [FieldUpdate], field: &str) -> Option<&'a str> {
        updates
            .iter()
            .find(|u| u.field == field)
            .map(|u| u.value.as_str())
    }

    #[test]
    fn test_medium_latte_with_oat_milk() {
        let extractor = coffee_extractor();
        let updates =
            extractor.extract(&ExtractorInput::utterance("I'd like a medium latte with oat milk"));

        assert_eq!(value_of(&updates, "drink_type"), Some("latte"));
        assert_eq!(value_of(&updates, "size"), Some("medium"));
        assert_eq!(value_of(&updates, "milk"), Some("oat"));
    }

    #[test]
    fn test_first_vocabulary_match_wins() {
        let extractor = coffee_extractor();
        // "latte" precedes "mocha" in candidate order.
        let updates = extractor.extract(&ExtractorInput::utterance("a mocha latte please"));
        assert_eq!(value_of(&updates, "drink_type"), Some("latte"));
    }

    #[test]
    fn test_extras_collect_all_matches() {
        let extractor = coffee_extractor();
        let updates = extractor
            .extract(&ExtractorInput::utterance("add caramel and whipped cream on top"));
        assert_eq!(value_of(&updates, "extras"), Some("caramel, whipped cream"));
    }

    #[test]
    fn test_name_heuristic() {
        let extractor = coffee_extractor();
        let updates = extractor.extract(&ExtractorInput::utterance("my name is Alice"));
        assert_eq!(value_of(&updates, "name"), Some("alice"));
    }

    #[test]
    fn test_for_overwrites_my_name_is() {
        let extractor = coffee_extractor();
        // Both markers fire; the "for" token wins. Known fragility, kept.
        let updates =
            extractor.extract(&ExtractorInput::utterance("my name is alice but it's for bob"));
        assert_eq!(value_of(&updates, "name"), Some("bob"));
    }

    #[test]
    fn test_trailing_marker_is_ignored() {
        let extractor = coffee_extractor();
        let updates = extractor.extract(&ExtractorInput::utterance("who is it for"));
        assert_eq!(value_of(&updates, "name"), None);
    }

    #[test]
    fn test_unrecognized_utterance_yields_nothing() {
        let extractor = coffee_extractor();
        let updates = extractor.extract(&ExtractorInput::utterance("what's the weather today"));
        assert!(updates.is_empty());
    }

    #[test]
    fn test_fields_input_is_ignored() {
        let extractor = coffee_extractor();
        let mut map = std::collections::HashMap::new();
        map.insert("size".to_string(), "large".to_string());
        assert!(extractor.extract(&ExtractorInput::fields(map)).is_empty());
    }

    #[test]
    fn test_phone_pattern() {
        let extractor = KeywordExtractor::new(Arc::new(AgentSchema::sales_lead()));
        let updates =
            extractor.extract(&ExtractorInput::utterance("you can call me on 9876543210"));
        assert_eq!(value_of(&updates, "phone"), Some("9876543210"));
    }
}
