//! Slot-filling conversation agents
//!
//! Four demo agents built on one recurring shape: a session-scoped
//! [`SlotTracker`](dst::SlotTracker) fed by an extraction strategy, a
//! completion policy choosing the next question, and a persistence step on
//! completion. Every public operation returns a human-readable string for
//! the external conversation driver to speak back to the user.

pub mod coffee;
pub mod dst;
pub mod fraud;
pub mod lead;
pub mod wellness;

pub use coffee::CoffeeOrderAgent;
pub use dst::SlotTracker;
pub use fraud::{pending_review_report, ConversationPhase, FraudVerificationAgent};
pub use lead::LeadCaptureAgent;
pub use wellness::WellnessCheckinAgent;
