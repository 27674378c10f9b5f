//! Core types and traits for the concierge demo agents
//!
//! This crate provides the foundational pieces shared by the other crates:
//! - Slot value and field update types
//! - The extraction strategy abstraction
//! - Error types

pub mod error;
pub mod extraction;
pub mod slots;

pub use error::{Error, Result};
pub use extraction::{ExtractorInput, SlotExtraction};
pub use slots::{normalize_list_tokens, FieldUpdate, SlotValue};
