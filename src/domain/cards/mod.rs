//! Skills card domain module
//!
//! The core of the service: the card document model, the builder that
//! turns a transcript and its derived fields into cards, the structural
//! validator, and the always-valid error document fallback.

mod builder;
mod card;
mod error_card;
mod invocation;
mod validator;

pub use builder::{
    build_diagnostics_document, build_document, build_summary_document, BuildError, DocumentParts,
};
pub use card::{
    Appearance, Card, CardDocument, CardKind, CardTitle, Entry, Invocation, SkillIdentity, Status,
    StatusCode, CARD_TYPE, SKILL_ID,
};
pub use error_card::build_error_document;
pub use invocation::InvocationId;
pub use validator::{validate, validate_document, Validation, KNOWN_CARD_TYPES};
