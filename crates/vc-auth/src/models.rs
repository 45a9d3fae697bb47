use serde::{Deserialize, Serialize};

/// Pre-auth request seeding the cookie jar
#[derive(Debug, Clone, Serialize)]
pub struct PreAuthRequest<'a> {
    pub acr_values: &'a str,
    pub claims: &'a str,
    pub client_id: &'a str,
    pub code_challenge: &'a str,
    pub code_challenge_method: &'a str,
    pub nonce: &'a str,
    pub redirect_uri: &'a str,
    pub scope: &'a str,
    pub response_type: &'a str,
}

/// Credential submission, sent to the same endpoint as pre-auth
#[derive(Debug, Clone, Serialize)]
pub struct CredentialsRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Multifactor code submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultifactorRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub code: &'a str,
    pub remember_device: bool,
}

/// Envelope returned by credential and multifactor submission.
///
/// Every shape the provider sends shares this structure; which fields are
/// meaningful depends on `type`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginEnvelope {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub response: Option<LoginResponse>,
    #[serde(default)]
    pub multifactor: Option<MultifactorDetails>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub parameters: Option<LoginParameters>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginParameters {
    #[serde(default)]
    pub uri: Option<String>,
}

/// Present on `"multifactor"` envelopes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MultifactorDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

/// User-info response
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub sub: String,
}

/// Entitlement token response
#[derive(Debug, Clone, Deserialize)]
pub struct EntitlementsResponse {
    pub entitlements_token: String,
}
