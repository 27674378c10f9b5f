//! Fraud verification agent
//!
//! Walks a customer through a flagged-transaction review: name lookup,
//! knowledge-based identity verification, then confirmation or dispute.
//! Identity verification gets exactly one attempt; a wrong answer is a
//! legitimate terminal state, persisted immediately, and transaction
//! details are never disclosed before verification succeeds.

use std::sync::Arc;

use concierge_core::Result;
use concierge_persistence::{CaseStatus, CaseStore, FraudCase};

/// Phases of a fraud review conversation
///
/// `NotFound` and `VerificationFailed` are terminal off-path states; every
/// operation called out of order re-prompts instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    Greeting,
    UsernameCollection,
    Verification,
    Investigation,
    Resolution,
    NotFound,
    VerificationFailed,
}

/// Session-scoped fraud review agent
pub struct FraudVerificationAgent {
    store: Arc<dyn CaseStore>,
    phase: ConversationPhase,
    case: Option<FraudCase>,
    bank_name: String,
}

impl FraudVerificationAgent {
    pub fn new(store: Arc<dyn CaseStore>) -> Self {
        Self {
            store,
            phase: ConversationPhase::Greeting,
            case: None,
            bank_name: "Unity Trust Bank".to_string(),
        }
    }

    /// Override the bank name used in the greeting
    pub fn with_bank_name(mut self, name: impl Into<String>) -> Self {
        self.bank_name = name.into();
        self
    }

    /// Current conversation phase
    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    /// Case under review, once looked up
    pub fn case(&self) -> Option<&FraudCase> {
        self.case.as_ref()
    }

    /// Opening line of the call
    pub fn greet(&mut self) -> String {
        if self.phase != ConversationPhase::Greeting {
            return self.reprompt();
        }
        self.phase = ConversationPhase::UsernameCollection;
        format!(
            "Hello, this is the card security team at {}. We've flagged a recent transaction \
             on your account and need to confirm a few details. May I have your full name, please?",
            self.bank_name
        )
    }

    /// Look up the customer's pending case by name
    pub async fn lookup_case(&mut self, name: &str) -> Result<String> {
        match self.phase {
            ConversationPhase::Greeting | ConversationPhase::UsernameCollection => {}
            _ => return Ok(self.reprompt()),
        }

        match self.store.find_pending_by_name(name).await? {
            Some(case) => {
                tracing::info!(case_id = case.id, "Pending case found");
                let question = case.security_question.clone();
                self.case = Some(case);
                self.phase = ConversationPhase::Verification;
                Ok(format!(
                    "Thank you. Before we continue I need to verify your identity. {}",
                    question
                ))
            }
            None => {
                tracing::info!(name = %name, "No pending case for name");
                self.phase = ConversationPhase::NotFound;
                Ok(not_found_message().to_string())
            }
        }
    }

    /// Single-attempt identity check against the stored security answer
    ///
    /// A match discloses the flagged transaction; a mismatch terminates the
    /// call path and records the failed verification on the case.
    pub async fn verify_identity(&mut self, answer: &str) -> Result<String> {
        if self.phase != ConversationPhase::Verification {
            return Ok(self.reprompt());
        }

        // The phase guarantees a looked-up case.
        let case = match self.case.as_ref() {
            Some(case) => case.clone(),
            None => return Ok(self.reprompt()),
        };

        if answer.trim().eq_ignore_ascii_case(case.security_answer.trim()) {
            self.phase = ConversationPhase::Investigation;
            Ok(format!(
                "You're verified. We flagged a transaction of ₹{:.2} at {} on {}, category {}, \
                 made via {} from {}, on your card ending {}. Did you authorize this transaction?",
                case.amount,
                case.merchant,
                case.transaction_time,
                case.category,
                case.source,
                case.location,
                case.card_ending
            ))
        } else {
            self.phase = ConversationPhase::VerificationFailed;
            self.store
                .update_status(
                    case.id,
                    CaseStatus::VerificationFailed,
                    "Identity verification failed during phone review",
                    false,
                )
                .await?;
            tracing::warn!(case_id = case.id, "Identity verification failed");
            Ok(verification_failed_message().to_string())
        }
    }

    /// Record the customer's confirmation or dispute of the transaction
    pub async fn resolve_case(&mut self, authorized: bool) -> Result<String> {
        if self.phase != ConversationPhase::Investigation {
            return Ok(self.reprompt());
        }

        let case = match self.case.as_ref() {
            Some(case) => case.clone(),
            None => return Ok(self.reprompt()),
        };

        let (status, outcome, reply) = if authorized {
            (
                CaseStatus::ConfirmedSafe,
                "Customer confirmed the transaction as legitimate".to_string(),
                format!(
                    "Thank you for confirming. We've marked the transaction as safe and your \
                     card ending {} remains active.",
                    case.card_ending
                ),
            )
        } else {
            (
                CaseStatus::ConfirmedFraud,
                format!(
                    "Customer did not authorize the ₹{:.2} transaction at {}; card blocked and dispute raised",
                    case.amount, case.merchant
                ),
                format!(
                    "I understand. We've blocked your card ending {} and raised a dispute for \
                     ₹{:.2}. A replacement card will reach you within five business days.",
                    case.card_ending, case.amount
                ),
            )
        };

        self.store
            .update_status(case.id, status, &outcome, true)
            .await?;
        self.phase = ConversationPhase::Resolution;
        tracing::info!(case_id = case.id, status = status.as_str(), "Case resolved");
        Ok(reply)
    }

    /// Corrective prompt for the current phase, used on out-of-order calls
    fn reprompt(&self) -> String {
        match self.phase {
            ConversationPhase::Greeting | ConversationPhase::UsernameCollection => {
                "May I have your full name so I can pull up your case?".to_string()
            }
            ConversationPhase::Verification => {
                let question = self
                    .case
                    .as_ref()
                    .map(|c| c.security_question.as_str())
                    .unwrap_or("Could you answer your security question?");
                format!("I still need to verify your identity first. {}", question)
            }
            ConversationPhase::Investigation => {
                "Please confirm whether you authorized the flagged transaction, yes or no."
                    .to_string()
            }
            ConversationPhase::Resolution => {
                "This case is already resolved. Is there anything else I can help you with?"
                    .to_string()
            }
            ConversationPhase::NotFound => not_found_message().to_string(),
            ConversationPhase::VerificationFailed => verification_failed_message().to_string(),
        }
    }
}

fn not_found_message() -> &'static str {
    "I'm sorry, I couldn't find any pending review under that name. \
     Please contact your nearest branch for assistance."
}

fn verification_failed_message() -> &'static str {
    "I'm sorry, that answer doesn't match our records. For your security I can't \
     continue over the phone. Please visit your nearest branch with a valid ID to \
     resolve this case."
}

/// Operator view of everything still pending review
pub async fn pending_review_report(store: &dyn CaseStore) -> Result<String> {
    let cases = store.list_pending().await?;
    if cases.is_empty() {
        return Ok("No cases pending review.".to_string());
    }

    let mut lines = vec![format!("{} case(s) pending review:", cases.len())];
    for case in &cases {
        lines.push(format!(
            "#{} {}: card ending {}, ₹{:.2} at {} ({}, {})",
            case.id,
            case.customer_name,
            case.card_ending,
            case.amount,
            case.merchant,
            case.source,
            case.location
        ));
    }
    Ok(lines.join("\n"))
}
