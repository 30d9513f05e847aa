//! Token storage and management

use serde::{Deserialize, Serialize};

/// Seconds of remaining lifetime below which a token counts as expired.
const EXPIRY_MARGIN_SECS: u64 = 300;

/// Stored access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub expires_at: Option<u64>,
}

fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

impl StoredToken {
    pub fn new(token: String, expires_in_secs: Option<u64>) -> Self {
        let expires_at = expires_in_secs.map(|secs| now_secs() + secs);
        Self { token, expires_at }
    }

    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            // Consider expired if less than 5 minutes remaining
            Some(exp) => now_secs() + EXPIRY_MARGIN_SECS >= exp,
            None => false,
        }
    }
}

/// Token store trait for different storage backends
pub trait TokenStore {
    fn get_access_token(&self) -> Option<StoredToken>;
    fn set_access_token(&mut self, token: String, expires_in: Option<u64>);
    fn get_refresh_token(&self) -> Option<String>;
    fn set_refresh_token(&mut self, token: String);
    fn clear_tokens(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_without_expiry_never_expires() {
        let token = StoredToken::new("abc".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_token_inside_margin_is_expired() {
        let token = StoredToken::new("abc".to_string(), Some(60));
        assert!(token.is_expired());

        let token = StoredToken::new("abc".to_string(), Some(3600));
        assert!(!token.is_expired());
    }
}
