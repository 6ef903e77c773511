//! Error card document builder
//!
//! When any part of the pipeline fails, the platform user must still see
//! a card rather than a blank metadata panel. This builder cannot fail:
//! its output is self-checked against the validator, and if a future rule
//! change ever rejects it, a hard-coded minimal card that satisfies every
//! rule by construction is returned instead.

use super::card::{Card, CardDocument, CardTitle, Invocation, SkillIdentity, Status, StatusCode};
use super::invocation::InvocationId;
use super::validator::validate_document;

/// Build a single-card document describing a processing failure.
/// Always returns a document that passes validation.
pub fn build_error_document(message: &str) -> CardDocument {
    let invocation_id = InvocationId::generate();

    let status_message = format!(
        "Error processing this file:\n\n{}\n\nPlease contact your administrator for assistance.",
        message.trim()
    );

    let document = CardDocument {
        cards: vec![Card::error(&invocation_id, &status_message)],
    };

    let validation = validate_document(&document);
    if validation.is_valid {
        document
    } else {
        tracing::error!(
            reason = %validation.reason,
            "error card failed validation, using minimal fallback"
        );
        minimal_fallback_document(&invocation_id)
    }
}

/// Bottom of the fallback chain: no entries, no timestamps, nothing that
/// any validation rule can reject.
fn minimal_fallback_document(invocation_id: &InvocationId) -> CardDocument {
    CardDocument {
        cards: vec![Card {
            card_type: "skill_card".to_string(),
            skill_card_type: "status".to_string(),
            skill_card_title: CardTitle {
                code: "system-error".to_string(),
                message: "System Error".to_string(),
            },
            skill: SkillIdentity {
                identity_type: "service".to_string(),
                id: "box-video-skill".to_string(),
            },
            invocation: Invocation {
                invocation_type: "skill_invocation".to_string(),
                id: invocation_id.as_str().to_string(),
            },
            duration: None,
            entries: None,
            status: Some(Status {
                code: StatusCode::Error,
                message: "A critical error occurred while processing this file.".to_string(),
            }),
        }],
    }
}
