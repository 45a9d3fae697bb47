use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;
use vc_auth::Session;
use vc_config::Region;

use crate::errors::{AccountError, Result};
use crate::models::{ClientVersionResponse, ContentItem, ContentResponse};

pub const CONTENT_API: &str = "https://valorant-api.com";

/// Base64 JSON describing a Windows PC client, required by the MMR endpoint
pub const CLIENT_PLATFORM: &str = "ew0KCSJwbGF0Zm9ybVR5cGUiOiAiUEMiLA0KCSJwbGF0Zm9ybU9TIjogIldpbmRvd3MiLA0KCSJwbGF0Zm9ybU9TVmVyc2lvbiI6ICIxMC4wLjE5MDQyLjEuMjU2LjY0Yml0IiwNCgkicGxhdGZvcm1DaGlwc2V0IjogIlVua25vd24iDQp9";

/// Hosts the account queries talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEndpoints {
    /// Player data host, `https://pd.<region>.a.pvp.net`
    pub player_data: Url,
    /// Public content catalogue used to resolve item names
    pub content: Url,
}

impl AccountEndpoints {
    pub fn for_region(region: Region) -> Result<Self> {
        Ok(Self {
            player_data: Url::parse(&format!("https://pd.{}.a.pvp.net", region.as_str()))?,
            content: Url::parse(CONTENT_API)?,
        })
    }
}

/// Authenticated client for the read-only account endpoints
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: Client,
    /// The content catalogue is public; session headers are never sent to it
    content_http: Client,
    endpoints: AccountEndpoints,
    user_id: String,
}

impl AccountClient {
    /// Build a client carrying the session's bearer and entitlement tokens
    pub fn new(session: &Session, region: Region) -> Result<Self> {
        Self::with_endpoints(session, AccountEndpoints::for_region(region)?)
    }

    pub fn with_endpoints(session: &Session, endpoints: AccountEndpoints) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", session.access_token()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let mut entitlement = HeaderValue::from_str(session.entitlement_token())?;
        entitlement.set_sensitive(true);
        headers.insert("X-Riot-Entitlements-JWT", entitlement);

        let http = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(30))
            .build()?;

        let content_http = Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            content_http,
            endpoints,
            user_id: session.user_id().to_string(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn player_data_url(&self, path: &str) -> Result<Url> {
        Ok(self.endpoints.player_data.join(path)?)
    }

    pub(crate) async fn get_player_data<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: HeaderMap,
    ) -> Result<T> {
        let url = self.player_data_url(path)?;
        debug!("GET {}", url.path());
        let response = self.http.get(url).headers(extra).send().await?;
        decode(response).await
    }

    /// Current client build, required by some player data endpoints
    #[instrument(skip(self))]
    pub async fn client_version(&self) -> Result<String> {
        let url = self.endpoints.content.join("/v1/version")?;
        let response = self.content_http.get(url).send().await?;
        let version: ClientVersionResponse = decode(response).await?;
        Ok(version.data.riot_client_version)
    }

    /// Look up display name and icon for an item in the public catalogue
    #[instrument(skip(self))]
    pub async fn content_item(&self, path: &str) -> Result<ContentItem> {
        let url = self.endpoints.content.join(path)?;
        let response = self.content_http.get(url).send().await?;
        let content: ContentResponse = decode(response).await?;
        Ok(content.data)
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AccountError::Http {
            status,
            body_snippet: body.chars().take(200).collect(),
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
