//! Slot extraction strategies
//!
//! Implements the two extraction strategies behind the
//! `concierge_core::SlotExtraction` interface:
//! - [`StructuredExtractor`] for already-segmented field values supplied by
//!   the conversation driver (the LLM tool-call path)
//! - [`KeywordExtractor`] for naive vocabulary scanning of raw utterances

pub mod keyword;
pub mod structured;

pub use keyword::KeywordExtractor;
pub use structured::StructuredExtractor;
