use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Proxy, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::{RiotAuthConfig, riot_client};
use crate::errors::{KnownAuthError, Result, RiotAuthError};
use crate::models::*;
use crate::session::{Credentials, Session, SessionTokens};
use crate::token::parse_redirect_uri;

const NONCE_LEN: usize = 16;

/// Nonce bound to one pre-auth call. Consumed by the credential submission
/// that follows it.
pub struct PreAuthContext {
    nonce: String,
}

impl PreAuthContext {
    fn generate() -> Result<Self> {
        let mut bytes = [0u8; NONCE_LEN];
        getrandom::fill(&mut bytes).map_err(|e| RiotAuthError::Nonce(e.to_string()))?;
        Ok(Self {
            nonce: URL_SAFE_NO_PAD.encode(bytes),
        })
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }
}

impl fmt::Debug for PreAuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreAuthContext").finish_non_exhaustive()
    }
}

/// Where a login attempt currently stands
#[derive(Debug)]
pub enum AuthState {
    Start,
    PreAuthorized(PreAuthContext),
    AwaitingCredentials,
    NeedsMultifactor,
    AwaitingMultifactor,
    Success,
    Failed,
}

impl AuthState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::PreAuthorized(_) => "PreAuthorized",
            Self::AwaitingCredentials => "AwaitingCredentials",
            Self::NeedsMultifactor => "NeedsMultifactor",
            Self::AwaitingMultifactor => "AwaitingMultifactor",
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }
}

/// Result of one credential or multifactor submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success { redirect_uri: String },
    NeedsMultifactor { email: Option<String> },
    AuthError { code: KnownAuthError },
    UnknownAuthError { code: String },
    UnknownResponseType { kind: String },
}

impl LoginOutcome {
    /// Map a login envelope onto an outcome.
    ///
    /// Order matters: `response`, then `auth` with an error, then
    /// `multifactor`. Anything else, including an `auth` envelope without an
    /// error, is never treated as success.
    pub fn from_envelope(envelope: LoginEnvelope) -> Result<Self> {
        let error = envelope.error.filter(|e| !e.is_empty());

        match (envelope.kind.as_str(), error) {
            ("response", _) => {
                let redirect_uri = envelope
                    .response
                    .and_then(|r| r.parameters)
                    .and_then(|p| p.uri)
                    .ok_or_else(|| {
                        RiotAuthError::MalformedRedirectUri(
                            "response envelope carries no uri".to_string(),
                        )
                    })?;
                Ok(Self::Success { redirect_uri })
            }
            ("auth", Some(code)) => match code.parse::<KnownAuthError>() {
                Ok(known) => Ok(Self::AuthError { code: known }),
                Err(()) => Ok(Self::UnknownAuthError { code }),
            },
            ("multifactor", _) => Ok(Self::NeedsMultifactor {
                email: envelope.multifactor.and_then(|m| m.email),
            }),
            (kind, _) => Ok(Self::UnknownResponseType {
                kind: kind.to_string(),
            }),
        }
    }
}

/// What a full login step hands back to the caller
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Authenticated(Session),
    /// Not an error: the caller must collect a code and call
    /// [`RiotAuthClient::complete_multifactor`]
    MultifactorRequired { email: Option<String> },
}

/// Client driving the Riot login flow.
///
/// Owns its own cookie jar. The pre-auth cookies bind the credential
/// submission that follows, so one client must never run two logins at once.
#[derive(Debug)]
pub struct RiotAuthClient {
    config: RiotAuthConfig,
    http: Client,
    cookies: Arc<Jar>,
    state: AuthState,
}

impl RiotAuthClient {
    /// Create a new authentication client
    pub fn new(config: RiotAuthConfig) -> Result<Self> {
        let cookies = Arc::new(Jar::default());

        let mut builder = Client::builder()
            .cookie_provider(cookies.clone())
            .use_rustls_tls()
            .min_tls_version(config.tls.min_version)
            .max_tls_version(config.tls.max_version)
            .connect_timeout(config.http_timeouts.connect)
            .timeout(config.http_timeouts.request)
            .user_agent(config.user_agent.as_str());

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str())?);
        }

        let http = builder.build()?;

        Ok(Self {
            config,
            http,
            cookies,
            state: AuthState::Start,
        })
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Whether the jar currently holds cookies for the identity endpoint
    pub fn has_identity_cookies(&self) -> bool {
        self.cookies
            .cookies(&self.config.endpoints.authorization)
            .is_some()
    }

    /// Seed the cookie jar and bind a fresh nonce to this login attempt
    #[instrument(skip(self))]
    pub async fn run_pre_auth(&mut self) -> Result<()> {
        let context = PreAuthContext::generate()?;
        let request = PreAuthRequest {
            acr_values: "",
            claims: "",
            client_id: &self.config.client_id,
            code_challenge: "",
            code_challenge_method: "",
            nonce: context.nonce(),
            redirect_uri: riot_client::REDIRECT_URI,
            scope: riot_client::SCOPE,
            response_type: riot_client::RESPONSE_TYPE,
        };

        debug!("Requesting pre-auth cookies");
        let mut response = self.post_pre_auth(&request).await?;

        if response.status() == StatusCode::FORBIDDEN
            && self.config.retry.retry_pre_auth_on_forbidden
        {
            warn!("Pre-auth responded with 403, retrying once with the cookies it set");
            response = self.post_pre_auth(&request).await?;
        }

        // The provider sometimes answers with an error status while still
        // setting usable cookies; the submission step decides.
        if !response.status().is_success() && !response.status().is_redirection() {
            warn!(status = %response.status(), "Pre-auth returned a non-success status");
        }

        self.state = AuthState::PreAuthorized(context);
        Ok(())
    }

    async fn post_pre_auth(&self, request: &PreAuthRequest<'_>) -> Result<Response> {
        Ok(self
            .http
            .post(self.config.endpoints.authorization.clone())
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?)
    }

    /// Submit username and password against the pre-authorized cookie jar
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn submit_credentials(&mut self, credentials: &Credentials) -> Result<LoginOutcome> {
        // The pre-auth context is consumed here; a retry has to run pre-auth again.
        match std::mem::replace(&mut self.state, AuthState::AwaitingCredentials) {
            AuthState::PreAuthorized(_) => {}
            other => return Err(self.restore_and_reject(other, "PreAuthorized")),
        }

        let request = CredentialsRequest {
            kind: "auth",
            username: &credentials.username,
            password: credentials.password(),
        };

        debug!("Submitting credentials");
        let outcome = self.put_login(&request).await;
        self.record(outcome)
    }

    /// Answer a multifactor challenge with the out-of-band code
    #[instrument(skip(self, code))]
    pub async fn submit_multifactor_code(&mut self, code: &str) -> Result<LoginOutcome> {
        match std::mem::replace(&mut self.state, AuthState::AwaitingMultifactor) {
            AuthState::NeedsMultifactor => {}
            other => return Err(self.restore_and_reject(other, "NeedsMultifactor")),
        }

        let request = MultifactorRequest {
            kind: "multifactor",
            code: code.trim(),
            remember_device: self.config.remember_device,
        };

        debug!("Submitting multifactor code");
        let outcome = self.put_login(&request).await;
        self.record(outcome)
    }

    fn restore_and_reject(&mut self, previous: AuthState, expected: &'static str) -> RiotAuthError {
        let actual = previous.name();
        self.state = previous;
        RiotAuthError::InvalidState { expected, actual }
    }

    fn record(&mut self, outcome: Result<LoginOutcome>) -> Result<LoginOutcome> {
        self.state = match &outcome {
            Ok(LoginOutcome::Success { .. }) => AuthState::Success,
            Ok(LoginOutcome::NeedsMultifactor { .. }) => AuthState::NeedsMultifactor,
            Ok(_) | Err(_) => AuthState::Failed,
        };
        outcome
    }

    async fn put_login<T: Serialize>(&self, body: &T) -> Result<LoginOutcome> {
        let response = self
            .http
            .put(self.config.endpoints.authorization.clone())
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(%status, "Login envelope received");

        let envelope: LoginEnvelope = serde_json::from_str(&text)?;
        LoginOutcome::from_envelope(envelope)
    }

    /// Exchange the access token for the user id and entitlement token.
    /// Nothing is returned unless both calls succeed.
    #[instrument(skip(self, tokens))]
    pub async fn derive_session(&self, tokens: SessionTokens) -> Result<Session> {
        let user_id = self.fetch_user_id(&tokens.access_token).await?;
        let entitlement_token = self.fetch_entitlement(&tokens.access_token).await?;

        info!(user_id = %user_id, "Session derived");
        Ok(Session::assemble(
            tokens,
            entitlement_token,
            user_id,
            Utc::now(),
        ))
    }

    /// Pre-auth, credential submission and session derivation in one call
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn authorize(&mut self, credentials: &Credentials) -> Result<AuthOutcome> {
        self.state = AuthState::Start;
        self.run_pre_auth().await?;
        let outcome = self.submit_credentials(credentials).await?;
        self.conclude(outcome).await
    }

    /// Finish a login that stopped at a multifactor challenge
    #[instrument(skip(self, code))]
    pub async fn complete_multifactor(&mut self, code: &str) -> Result<AuthOutcome> {
        let outcome = self.submit_multifactor_code(code).await?;
        self.conclude(outcome).await
    }

    async fn conclude(&mut self, outcome: LoginOutcome) -> Result<AuthOutcome> {
        let redirect_uri = match outcome {
            LoginOutcome::Success { redirect_uri } => redirect_uri,
            LoginOutcome::NeedsMultifactor { email } => {
                info!("Provider requested a multifactor code");
                return Ok(AuthOutcome::MultifactorRequired { email });
            }
            LoginOutcome::AuthError { code } => {
                warn!(code = code.as_str(), "Login rejected");
                return Err(RiotAuthError::Auth(code));
            }
            LoginOutcome::UnknownAuthError { code } => {
                warn!(code = %code, "Login rejected with an unrecognised error code");
                return Err(RiotAuthError::UnknownAuthError(code));
            }
            LoginOutcome::UnknownResponseType { kind } => {
                warn!(kind = %kind, "Unrecognised login response type");
                return Err(RiotAuthError::UnknownResponseType(kind));
            }
        };

        let derived = match parse_redirect_uri(&redirect_uri) {
            Ok(tokens) => self.derive_session(tokens).await,
            Err(e) => Err(e),
        };

        match derived {
            Ok(session) => Ok(AuthOutcome::Authenticated(session)),
            Err(e) => {
                self.state = AuthState::Failed;
                Err(e)
            }
        }
    }

    /// Confirm a stored session's access token is still accepted
    #[instrument(skip(self, session))]
    pub async fn revalidate(&self, session: &Session) -> Result<()> {
        let user_id = match self.fetch_user_id(session.access_token()).await {
            Err(RiotAuthError::Http { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                return Err(RiotAuthError::SessionRejected);
            }
            other => other?,
        };

        if user_id != session.user_id() {
            warn!("Provider returned a different user id for the stored token");
            return Err(RiotAuthError::SessionRejected);
        }

        Ok(())
    }

    /// Fetch the opaque user id (`sub`) for an access token
    #[instrument(skip(self, access_token))]
    pub async fn fetch_user_id(&self, access_token: &str) -> Result<String> {
        debug!("Fetching user info");
        let response = self
            .http
            .get(self.config.endpoints.user_info.clone())
            .bearer_auth(access_token)
            .send()
            .await?;

        let info: UserInfoResponse = decode(ensure_success(response).await?).await?;
        Ok(info.sub)
    }

    /// Fetch the entitlement token for an access token
    #[instrument(skip(self, access_token))]
    pub async fn fetch_entitlement(&self, access_token: &str) -> Result<String> {
        debug!("Fetching entitlement token");
        let response = self
            .http
            .post(self.config.endpoints.entitlements.clone())
            .bearer_auth(access_token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let entitlements: EntitlementsResponse = decode(ensure_success(response).await?).await?;
        Ok(entitlements.entitlements_token)
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RiotAuthError::Http {
        status,
        body_snippet: body.chars().take(200).collect(),
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
