//! Skills card document model
//!
//! The structs here serialize to the exact JSON shape the Box Skills
//! metadata API accepts. Field names are the wire contract and must not
//! change.

use serde::{Deserialize, Serialize};

use super::invocation::InvocationId;

/// Discriminator value carried by every card
pub const CARD_TYPE: &str = "skill_card";

/// Skill identifier stamped on every card
pub const SKILL_ID: &str = "box-video-skill";

/// The five kinds of card this service produces.
///
/// Box distinguishes cards by the `skill_card_type` string; summary,
/// diagnostics, and error cards all travel as `status` cards and differ
/// only in title and status payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Transcript,
    Summary,
    Keyword,
    Diagnostics,
    Error,
}

impl CardKind {
    /// Wire value for `skill_card_type`
    pub const fn wire_type(&self) -> &'static str {
        match self {
            Self::Transcript => "transcript",
            Self::Keyword => "keyword",
            Self::Summary | Self::Diagnostics | Self::Error => "status",
        }
    }

    /// Title code for `skill_card_title.code`
    pub const fn title_code(&self) -> &'static str {
        match self {
            Self::Transcript => "transcript",
            Self::Summary => "summary",
            Self::Keyword => "keywords",
            Self::Diagnostics => "processing_info",
            Self::Error => "processing-error",
        }
    }

    /// Human-readable title for `skill_card_title.message`
    pub const fn title_message(&self) -> &'static str {
        match self {
            Self::Transcript => "Transcript",
            Self::Summary => "Summary",
            Self::Keyword => "Keywords",
            Self::Diagnostics => "AI Processing Details",
            Self::Error => "Processing Error",
        }
    }
}

/// Card title object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTitle {
    pub code: String,
    pub message: String,
}

/// Identifies the producing skill on each card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillIdentity {
    #[serde(rename = "type")]
    pub identity_type: String,
    pub id: String,
}

impl SkillIdentity {
    fn service() -> Self {
        Self {
            identity_type: "service".to_string(),
            id: SKILL_ID.to_string(),
        }
    }
}

/// Correlates every card emitted by one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(rename = "type")]
    pub invocation_type: String,
    pub id: String,
}

impl Invocation {
    fn new(id: &InvocationId) -> Self {
        Self {
            invocation_type: "skill_invocation".to_string(),
            id: id.as_str().to_string(),
        }
    }
}

/// One playback position for a transcript entry, in whole seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub start: u64,
}

/// One entry in a transcript or keyword card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appears: Option<Vec<Appearance>>,
}

impl Entry {
    /// Entry with text only (keyword cards)
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            appears: None,
        }
    }

    /// Entry with a single playback position (transcript cards)
    pub fn timed(text: impl Into<String>, start: u64) -> Self {
        Self {
            text: text.into(),
            appears: Some(vec![Appearance { start }]),
        }
    }
}

/// Status payload carried by status-style cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
}

/// Status outcome code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCode {
    Success,
    Error,
}

/// One Skills card in wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub card_type: String,
    pub skill_card_type: String,
    pub skill_card_title: CardTitle,
    pub skill: SkillIdentity,
    pub invocation: Invocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<Entry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl Card {
    /// Common fields for a card of the given kind
    fn base(kind: CardKind, invocation_id: &InvocationId) -> Self {
        Self {
            card_type: CARD_TYPE.to_string(),
            skill_card_type: kind.wire_type().to_string(),
            skill_card_title: CardTitle {
                code: kind.title_code().to_string(),
                message: kind.title_message().to_string(),
            },
            skill: SkillIdentity::service(),
            invocation: Invocation::new(invocation_id),
            duration: None,
            entries: None,
            status: None,
        }
    }

    /// Transcript card with one entry per segment, in playback order
    pub fn transcript(invocation_id: &InvocationId, duration: u64, entries: Vec<Entry>) -> Self {
        Self {
            duration: Some(duration),
            entries: Some(entries),
            ..Self::base(CardKind::Transcript, invocation_id)
        }
    }

    /// Summary card carrying the summary text as a success status
    pub fn summary(invocation_id: &InvocationId, summary: &str) -> Self {
        Self {
            status: Some(Status {
                code: StatusCode::Success,
                message: summary.to_string(),
            }),
            ..Self::base(CardKind::Summary, invocation_id)
        }
    }

    /// Keyword card with one entry per keyword, in extraction order
    pub fn keyword(invocation_id: &InvocationId, entries: Vec<Entry>) -> Self {
        Self {
            entries: Some(entries),
            ..Self::base(CardKind::Keyword, invocation_id)
        }
    }

    /// Diagnostics card carrying the processing report as a success status
    pub fn diagnostics(invocation_id: &InvocationId, report: &str) -> Self {
        Self {
            status: Some(Status {
                code: StatusCode::Success,
                message: report.to_string(),
            }),
            ..Self::base(CardKind::Diagnostics, invocation_id)
        }
    }

    /// Error card carrying the failure description as an error status
    pub fn error(invocation_id: &InvocationId, message: &str) -> Self {
        Self {
            status: Some(Status {
                code: StatusCode::Error,
                message: message.to_string(),
            }),
            ..Self::base(CardKind::Error, invocation_id)
        }
    }
}

/// The full ordered card collection produced by one pipeline run.
/// Immutable once validated; discarded after upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDocument {
    pub cards: Vec<Card>,
}

impl CardDocument {
    /// Serialize to the JSON value sent to the metadata API.
    /// A serializer fault degrades to a validation failure downstream.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
