//! Box Skills token value object

use serde::Deserialize;

/// One access grant inside a Skills token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
}

/// The token object delivered with a Skills webhook: a read grant for
/// downloading the file and a write grant for writing metadata back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillsToken {
    pub read: Option<TokenGrant>,
    pub write: Option<TokenGrant>,
}

impl SkillsToken {
    pub fn new(read: Option<String>, write: Option<String>) -> Self {
        Self {
            read: read.map(|access_token| TokenGrant { access_token }),
            write: write.map(|access_token| TokenGrant { access_token }),
        }
    }

    /// Token for content downloads.
    pub fn read_token(&self) -> Option<&str> {
        self.read.as_ref().map(|grant| grant.access_token.as_str())
    }

    /// Token for metadata writes; falls back to the read grant when the
    /// webhook carried no write grant.
    pub fn write_token(&self) -> Option<&str> {
        self.write
            .as_ref()
            .map(|grant| grant.access_token.as_str())
            .or_else(|| self.read_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_webhook_token_shape() {
        let token: SkillsToken = serde_json::from_value(serde_json::json!({
            "read": {"access_token": "r-token", "expires_in": 3600, "token_type": "bearer"},
            "write": {"access_token": "w-token", "expires_in": 3600, "token_type": "bearer"}
        }))
        .unwrap();

        assert_eq!(token.read_token(), Some("r-token"));
        assert_eq!(token.write_token(), Some("w-token"));
    }

    #[test]
    fn write_falls_back_to_read() {
        let token = SkillsToken::new(Some("r-token".into()), None);
        assert_eq!(token.write_token(), Some("r-token"));
    }

    #[test]
    fn empty_token_has_no_grants() {
        let token = SkillsToken::default();
        assert_eq!(token.read_token(), None);
        assert_eq!(token.write_token(), None);
    }
}
