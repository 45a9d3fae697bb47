use std::time::Duration;

use reqwest::tls;
use url::Url;

/// Riot identity endpoints
pub mod endpoints {
    /// Shared by pre-auth (POST), credential and multifactor submission (PUT)
    pub const AUTHORIZATION: &str = "https://auth.riotgames.com/api/v1/authorization";
    pub const USER_INFO: &str = "https://auth.riotgames.com/userinfo";
    pub const ENTITLEMENTS: &str = "https://entitlements.auth.riotgames.com/api/token/v1";
}

/// Identity values the Riot client presents during pre-auth
pub mod riot_client {
    pub const CLIENT_ID: &str = "riot-client";
    pub const REDIRECT_URI: &str = "http://localhost/redirect";
    pub const SCOPE: &str = "openid link ban lol_region account";
    pub const RESPONSE_TYPE: &str = "token id_token";
    pub const USER_AGENT: &str =
        "RiotClient/63.0.9.4909983.4789131 rso-auth (Windows;10;;Professional, x64)";
}

/// Age after which a persisted session is discarded without asking the provider
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Resolved endpoint set. Overridable so the flow can be pointed at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub authorization: Url,
    pub user_info: Url,
    pub entitlements: Url,
}

impl Endpoints {
    /// Point every endpoint at `base`, keeping the production paths
    pub fn with_base(base: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            authorization: base.join("/api/v1/authorization")?,
            user_info: base.join("/userinfo")?,
            entitlements: base.join("/api/token/v1")?,
        })
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorization: Url::parse(endpoints::AUTHORIZATION).expect("valid authorization URL"),
            user_info: Url::parse(endpoints::USER_INFO).expect("valid userinfo URL"),
            entitlements: Url::parse(endpoints::ENTITLEMENTS).expect("valid entitlements URL"),
        }
    }
}

/// TLS handshake profile presented to the identity service.
///
/// The provider filters clients by handshake shape, so the default pins
/// TLS 1.3 only. With rustls that leaves exactly the AES-128-GCM,
/// AES-256-GCM and CHACHA20-POLY1305 suites on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsProfile {
    pub min_version: tls::Version,
    pub max_version: tls::Version,
}

impl Default for TlsProfile {
    fn default() -> Self {
        Self {
            min_version: tls::Version::TLS_1_3,
            max_version: tls::Version::TLS_1_3,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(15),
            request: Duration::from_secs(30),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    /// Re-issue the pre-auth request once when the provider answers 403
    pub retry_pre_auth_on_forbidden: bool,
}

/// Configuration for RiotAuthClient
#[derive(Debug, Clone)]
pub struct RiotAuthConfig {
    pub endpoints: Endpoints,

    /// Client id sent with the pre-auth request
    pub client_id: String,

    pub user_agent: String,

    pub tls: TlsProfile,

    /// HTTP client timeouts
    pub http_timeouts: HttpTimeouts,

    /// Optional outbound proxy for every request
    pub proxy: Option<Url>,

    /// Retry policy
    pub retry: RetryPolicy,

    /// Ask the provider to trust this device after a multifactor login
    pub remember_device: bool,
}

impl RiotAuthConfig {
    /// Configuration matching the desktop Riot client
    pub fn riot_client() -> Self {
        Self {
            endpoints: Endpoints::default(),
            client_id: riot_client::CLIENT_ID.to_string(),
            user_agent: riot_client::USER_AGENT.to_string(),
            tls: TlsProfile::default(),
            http_timeouts: HttpTimeouts::default(),
            proxy: None,
            retry: RetryPolicy::default(),
            remember_device: true,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_proxy(mut self, proxy: Url) -> Self {
        self.proxy = Some(proxy);
        self
    }
}

impl Default for RiotAuthConfig {
    fn default() -> Self {
        Self::riot_client()
    }
}
