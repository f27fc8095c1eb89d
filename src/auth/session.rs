use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Persisted credential bundle used to authorize requests.
///
/// Written on successful login and replaced wholesale. An authorization
/// header is only ever derived from a token whose `profile.expires_at`
/// is still in the future.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token_type: String,
    pub access_token: String,
    #[serde(default)]
    pub user_name: String,
    pub profile: TokenProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenProfile {
    /// Expiry as epoch seconds
    pub expires_at: i64,
    /// Issue time as epoch seconds, when the service reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl SessionToken {
    /// Whether the token can no longer authorize requests.
    pub fn is_expired(&self) -> bool {
        self.profile.expires_at <= Utc::now().timestamp()
    }

    /// Authorization header value: `"<token_type> <access_token>"`.
    pub fn bearer(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Seconds remaining until expiry (zero once expired).
    pub fn expires_in(&self) -> i64 {
        (self.profile.expires_at - Utc::now().timestamp()).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at: i64) -> SessionToken {
        SessionToken {
            token_type: "Bearer".to_string(),
            access_token: "abc".to_string(),
            user_name: "admin".to_string(),
            profile: TokenProfile {
                expires_at,
                auth_time: None,
                key: None,
            },
        }
    }

    #[test]
    fn test_bearer_format() {
        let t = token(Utc::now().timestamp() + 3600);
        assert_eq!(t.bearer(), "Bearer abc");
    }

    #[test]
    fn test_expiry() {
        assert!(!token(Utc::now().timestamp() + 3600).is_expired());
        assert!(token(Utc::now().timestamp() - 1).is_expired());
    }

    #[test]
    fn test_expires_in_is_never_negative() {
        assert_eq!(token(Utc::now().timestamp() - 3600).expires_in(), 0);
    }

    #[test]
    fn test_missing_user_name_defaults_to_empty() {
        let json = r#"{"token_type":"Bearer","access_token":"abc","profile":{"expires_at":1}}"#;
        let t: SessionToken = serde_json::from_str(json).unwrap();
        assert_eq!(t.user_name, "");
    }
}
