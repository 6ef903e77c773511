//! Invocation ID value object

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use super::card::SKILL_ID;

/// Correlation identifier shared by every card emitted in one pipeline run.
///
/// Box displays cards from the same invocation together; concurrent runs
/// must each carry their own ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvocationId(String);

impl InvocationId {
    /// Generate an ID from the wall clock, `box-video-skill-<unix-seconds>`
    pub fn generate() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self(format!("{}-{}", SKILL_ID, seconds))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for InvocationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for InvocationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_uses_skill_prefix() {
        let id = InvocationId::generate();
        assert!(id.as_str().starts_with("box-video-skill-"));
    }

    #[test]
    fn generate_suffix_is_numeric() {
        let id = InvocationId::generate();
        let suffix = id.as_str().trim_start_matches("box-video-skill-");
        assert!(suffix.parse::<u64>().is_ok());
    }

    #[test]
    fn from_str_round_trips() {
        let id = InvocationId::from("box-video-skill-42");
        assert_eq!(id.to_string(), "box-video-skill-42");
    }
}
