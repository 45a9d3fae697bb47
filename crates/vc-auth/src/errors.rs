use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Riot identity service error types
#[derive(Error, Debug)]
pub enum RiotAuthError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status}: {body_snippet}")]
    Http {
        status: reqwest::StatusCode,
        body_snippet: String,
    },

    #[error("JSON serialization/deserialization error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Malformed redirect URI: {0}")]
    MalformedRedirectUri(String),

    #[error("Authentication rejected: {0}")]
    Auth(KnownAuthError),

    #[error("Unknown authentication error code '{0}' - the known error table may need updating")]
    UnknownAuthError(String),

    #[error("Unknown login response type '{0}'")]
    UnknownResponseType(String),

    #[error("Operation requires state {expected}, but the login is in state {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Stored session was rejected by the provider")]
    SessionRejected,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is locked by another process")]
    LockTimeout,

    #[error("Failed to generate nonce: {0}")]
    Nonce(String),
}

/// Error codes the identity service is known to return inside an
/// `{"type": "auth", "error": ...}` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownAuthError {
    AuthFailure,
    InvalidCredentials,
    RateLimited,
    MultifactorAttemptFailed,
    InvalidSessionId,
    InvalidUser,
    PasswordExpired,
    AccountLocked,
}

impl KnownAuthError {
    pub const ALL: [KnownAuthError; 8] = [
        Self::AuthFailure,
        Self::InvalidCredentials,
        Self::RateLimited,
        Self::MultifactorAttemptFailed,
        Self::InvalidSessionId,
        Self::InvalidUser,
        Self::PasswordExpired,
        Self::AccountLocked,
    ];

    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthFailure => "auth_failure",
            Self::InvalidCredentials => "invalid_credentials",
            Self::RateLimited => "rate_limited",
            Self::MultifactorAttemptFailed => "multifactor_attempt_failed",
            Self::InvalidSessionId => "invalid_session_id",
            Self::InvalidUser => "invalid_user",
            Self::PasswordExpired => "password_expired",
            Self::AccountLocked => "account_locked",
        }
    }

    /// Message suitable for showing to the person logging in
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AuthFailure | Self::InvalidCredentials => "username or password is incorrect",
            Self::RateLimited => "too many login attempts, wait a few minutes and try again",
            Self::MultifactorAttemptFailed => "the multifactor code was not accepted",
            Self::InvalidSessionId => "the login session expired, start the login again",
            Self::InvalidUser => "this account does not exist",
            Self::PasswordExpired => "the account password has expired and must be reset",
            Self::AccountLocked => "the account is locked",
        }
    }
}

impl FromStr for KnownAuthError {
    type Err = ();

    fn from_str(code: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|known| known.as_str() == code)
            .ok_or(())
    }
}

impl fmt::Display for KnownAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.user_message(), self.as_str())
    }
}

pub type Result<T> = std::result::Result<T, RiotAuthError>;
