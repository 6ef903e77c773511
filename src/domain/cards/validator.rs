//! Structural validation of card documents
//!
//! Validation runs over the serialized JSON value rather than the typed
//! model, so it checks exactly what will be sent over the wire. It is
//! deliberately permissive about unrecognized `skill_card_type` values
//! (forward compatibility) while staying strict about per-type shape
//! rules: a transcript timestamp must be an integer, never a float.

use serde_json::Value;

use super::card::{CardDocument, CARD_TYPE};

/// Card type strings this service knows about. Anything else passes
/// validation with a warning.
pub const KNOWN_CARD_TYPES: &[&str] = &["transcript", "text", "keyword", "status"];

/// Outcome of a validation pass. Failure is a normal result, never a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub reason: String,
}

impl Validation {
    fn pass() -> Self {
        Self {
            is_valid: true,
            reason: String::new(),
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
        }
    }
}

/// Validate a typed document by serializing it first.
pub fn validate_document(document: &CardDocument) -> Validation {
    validate(&document.to_value())
}

/// Validate the JSON shape of a card document.
///
/// Rules are checked top to bottom and short-circuit on the first
/// failure; the reason names the offending card or entry by 1-based
/// index.
pub fn validate(document: &Value) -> Validation {
    let Some(metadata) = document.as_object() else {
        return Validation::fail("metadata must be a JSON object");
    };

    let Some(cards_value) = metadata.get("cards") else {
        return Validation::fail("metadata must have a 'cards' key");
    };

    let Some(cards) = cards_value.as_array() else {
        return Validation::fail("the 'cards' value must be a list");
    };

    for (i, card_value) in cards.iter().enumerate() {
        let index = i + 1;

        let Some(card) = card_value.as_object() else {
            return Validation::fail(format!("card {index} must be an object"));
        };

        if card.get("type").and_then(Value::as_str) != Some(CARD_TYPE) {
            return Validation::fail(format!("card {index} must have type 'skill_card'"));
        }

        let Some(kind) = card.get("skill_card_type").and_then(Value::as_str) else {
            return Validation::fail(format!("card {index} missing 'skill_card_type'"));
        };

        if !KNOWN_CARD_TYPES.contains(&kind) {
            tracing::warn!(card = index, kind, "unrecognized skill_card_type, allowing");
        }

        for field in ["skill_card_title", "skill", "invocation"] {
            if !card.contains_key(field) {
                return Validation::fail(format!("card {index} missing '{field}'"));
            }
        }

        let entries_value = card.get("entries");

        if let Some(value) = entries_value {
            if !value.is_array() {
                return Validation::fail(format!("card {index} 'entries' must be a list"));
            }
        }

        // Status cards carry a status object instead of entries.
        if kind == "status" {
            if !card.contains_key("status") {
                return Validation::fail(format!("card {index} missing 'status'"));
            }
        } else if entries_value.is_none() {
            return Validation::fail(format!("card {index} missing 'entries'"));
        }

        let Some(entries) = entries_value.and_then(Value::as_array) else {
            continue;
        };

        for (j, entry) in entries.iter().enumerate() {
            let entry_index = j + 1;

            if entry.get("text").is_none() {
                return Validation::fail(format!(
                    "entry {entry_index} in card {index} missing 'text' field"
                ));
            }

            if kind != "transcript" {
                continue;
            }

            let Some(appears_value) = entry.get("appears") else {
                return Validation::fail(format!(
                    "transcript entry {entry_index} missing 'appears' field"
                ));
            };

            let Some(appears) = appears_value.as_array() else {
                return Validation::fail(format!(
                    "transcript entry {entry_index} 'appears' must be a list"
                ));
            };

            if appears.is_empty() {
                return Validation::fail(format!(
                    "transcript entry {entry_index} 'appears' must not be empty"
                ));
            }

            for timestamp in appears {
                let Some(start) = timestamp.get("start") else {
                    return Validation::fail(format!(
                        "transcript entry {entry_index} has a timestamp missing 'start'"
                    ));
                };

                if !start.is_i64() && !start.is_u64() {
                    return Validation::fail(format!(
                        "transcript entry {entry_index} 'start' must be an integer (seconds)"
                    ));
                }
            }
        }
    }

    Validation::pass()
}
