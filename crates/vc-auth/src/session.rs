use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::config::FRESHNESS_WINDOW;

/// Username and password for one login attempt.
///
/// The password is wiped from memory when dropped and never appears in
/// `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Tokens carried in the redirect URI fragment of a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
    pub access_token: String,
    pub id_token: String,
    /// Provider-declared access token lifetime in seconds
    pub expires_in: u64,
}

/// Fully derived login session.
///
/// The entitlement token and user id are always derived from the access
/// token stored alongside them; a `Session` only exists once all three are
/// known, and is replaced wholesale on re-authentication.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    auth_tokens: SessionTokens,
    entitlement_token: String,
    user_id: String,
    saved_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn assemble(
        auth_tokens: SessionTokens,
        entitlement_token: String,
        user_id: String,
        acquired_at: DateTime<Utc>,
    ) -> Self {
        Self {
            auth_tokens,
            entitlement_token,
            user_id,
            saved_at: acquired_at,
        }
    }

    pub fn tokens(&self) -> &SessionTokens {
        &self.auth_tokens
    }

    pub fn access_token(&self) -> &str {
        &self.auth_tokens.access_token
    }

    pub fn entitlement_token(&self) -> &str {
        &self.entitlement_token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// When the session was acquired from the provider
    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.saved_at
    }

    /// Whether the session is still inside the local freshness window.
    /// A session exactly one window old is stale.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let window = chrono::Duration::from_std(FRESHNESS_WINDOW)
            .unwrap_or(chrono::Duration::hours(1));
        now.signed_duration_since(self.saved_at) < window
    }

    /// All derived parts are present. Guards against hand-edited session files.
    pub fn is_complete(&self) -> bool {
        !self.auth_tokens.access_token.is_empty()
            && !self.auth_tokens.id_token.is_empty()
            && !self.entitlement_token.is_empty()
            && !self.user_id.is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("expires_in", &self.auth_tokens.expires_in)
            .field("saved_at", &self.saved_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) fn test_session(saved_at: DateTime<Utc>) -> Session {
    Session::assemble(
        SessionTokens {
            access_token: "access".to_string(),
            id_token: "id".to_string(),
            expires_in: 3600,
        },
        "entitlement".to_string(),
        "user-uuid".to_string(),
        saved_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_freshness_boundary() {
        let now = Utc::now();

        assert!(test_session(now).is_fresh(now));
        assert!(test_session(now - Duration::minutes(59)).is_fresh(now));
        assert!(test_session(now - Duration::seconds(3599)).is_fresh(now));
        assert!(!test_session(now - Duration::hours(1)).is_fresh(now));
        assert!(!test_session(now - Duration::hours(2)).is_fresh(now));
    }

    #[test]
    fn test_persisted_shape() {
        let saved_at = "2024-05-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let json = serde_json::to_value(test_session(saved_at)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "authTokens": {"accessToken": "access", "idToken": "id", "expiresIn": 3600},
                "entitlementToken": "entitlement",
                "userId": "user-uuid",
                "savedAt": "2024-05-01T12:00:00Z"
            })
        );
    }

    #[test]
    fn test_partial_file_does_not_decode() {
        let result = serde_json::from_str::<Session>(
            r#"{"authTokens":{"accessToken":"a","idToken":"i","expiresIn":1},"userId":"u","savedAt":"2024-05-01T12:00:00Z"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::new("player", "hunter2");
        assert!(!format!("{:?}", creds).contains("hunter2"));

        let session = test_session(Utc::now());
        let debug = format!("{:?}", session);
        assert!(!debug.contains("access"));
        assert!(!debug.contains("entitlement"));
    }
}
