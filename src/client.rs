//! Hoopla API client.
//!
//! Low-level HTTP session that handles authentication and raw requests.
//! Resource behavior lives on the model types and reaches the network only
//! through the [`Session`] trait implemented here.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use serde_with::{serde_as, DurationSeconds};
use url::Url;

use crate::error::{HooplaError, Result};
use crate::models::Connection;
use crate::session::{HttpResponse, Session};

const DEFAULT_API_URL: &str = "https://api.hoopla.net/";
const TOKEN_PATH: &str = "oauth2/token";
const USER_AGENT: &str = concat!("hoopla/", env!("CARGO_PKG_VERSION"));

/// Token endpoint response.
#[serde_as]
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde_as(as = "Option<DurationSeconds<u64>>")]
    expires_in: Option<Duration>,
}

/// Authenticated Hoopla API session.
///
/// Sends every request with the bearer token acquired at construction.
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use hoopla::HooplaClient;
///
/// # async fn example() -> hoopla::Result<()> {
/// // Client-credentials grant using HOOPLA_CLIENT_ID / HOOPLA_CLIENT_SECRET
/// let client = HooplaClient::from_env().await?;
///
/// // Or with a token obtained elsewhere
/// let client = HooplaClient::new("access-token", "https://api.hoopla.net")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HooplaClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for HooplaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HooplaClient")
            .field("base_url", &self.base_url.as_str())
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

impl HooplaClient {
    /// Authenticate using environment variables.
    ///
    /// Uses `HOOPLA_CLIENT_ID` and `HOOPLA_CLIENT_SECRET` for the
    /// client-credentials grant and optionally `HOOPLA_API_URL` for the base
    /// URL (defaults to `https://api.hoopla.net/`).
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is not set or authentication fails.
    pub async fn from_env() -> Result<Self> {
        let client_id = env::var("HOOPLA_CLIENT_ID").map_err(|_| {
            HooplaError::ConfigMissing("HOOPLA_CLIENT_ID environment variable not set".to_string())
        })?;
        let client_secret = env::var("HOOPLA_CLIENT_SECRET").map_err(|_| {
            HooplaError::ConfigMissing(
                "HOOPLA_CLIENT_SECRET environment variable not set".to_string(),
            )
        })?;
        let base_url = env::var("HOOPLA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::authenticate(&client_id, &client_secret, &base_url).await
    }

    /// Create a client with an already acquired access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        Ok(Self {
            http: Self::build_http()?,
            base_url: Arc::new(Self::normalize_base_url(base_url)?),
            token: token.to_string(),
            expires_at: None,
        })
    }

    /// Acquire a token with the OAuth2 client-credentials grant.
    ///
    /// # Errors
    ///
    /// Returns [`HooplaError::Auth`] if the token endpoint rejects the
    /// credentials.
    #[tracing::instrument(skip(client_secret))]
    pub async fn authenticate(client_id: &str, client_secret: &str, base_url: &str) -> Result<Self> {
        let base_url = Self::normalize_base_url(base_url)?;
        let http = Self::build_http()?;
        let token_url = base_url.join(TOKEN_PATH)?;

        let response = http
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) if !body.is_empty() => body,
                _ => format!("HTTP {status}"),
            };
            return Err(HooplaError::Auth {
                message,
                status_code: Some(status.as_u16()),
            });
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(token_type = ?token.token_type, expires_in = ?token.expires_in, "acquired access token");

        let expires_at = token
            .expires_in
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .map(|ttl| Utc::now() + ttl);

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.access_token,
            expires_at,
        })
    }

    fn build_http() -> Result<Client> {
        Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(HooplaError::Http)
    }

    fn normalize_base_url(base_url: &str) -> Result<Url> {
        // Ensure base URL ends with /
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(Url::parse(&base_url)?)
    }

    /// Get the base URL, which is also the API root document.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// When the access token expires, if the server said.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the access token is known to have expired.
    pub fn token_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }

    /// Load the API root through this client.
    pub async fn connect(&self) -> Result<Connection> {
        Connection::open(Arc::new(self.clone()), self.base_url.as_str()).await
    }

    /// Resolve an href; absolute URLs pass through unchanged.
    fn resolve(&self, href: &str) -> Result<Url> {
        Ok(self.base_url.join(href)?)
    }

    /// Read a response fully, keeping the URL the request was sent to.
    async fn read_response(url: Url, response: Response) -> Result<HttpResponse> {
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(status = status.as_u16(), %url, "received response");

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            url: url.to_string(),
            text,
        })
    }
}

#[async_trait]
impl Session for HooplaClient {
    #[tracing::instrument(skip(self, params))]
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<HttpResponse> {
        let url = self.resolve(url)?;

        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .await?;

        Self::read_response(url, response).await
    }

    #[tracing::instrument(skip(self, body))]
    async fn post(&self, url: &str, content_type: &str, body: &Value) -> Result<HttpResponse> {
        let url = self.resolve(url)?;

        let response = self
            .http
            .post(url.clone())
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, content_type)
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;

        Self::read_response(url, response).await
    }

    #[tracing::instrument(skip(self, body))]
    async fn put(&self, url: &str, content_type: &str, body: &Value) -> Result<HttpResponse> {
        let url = self.resolve(url)?;

        let response = self
            .http
            .put(url.clone())
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, content_type)
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;

        Self::read_response(url, response).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, url: &str) -> Result<HttpResponse> {
        let url = self.resolve(url)?;

        let response = self
            .http
            .delete(url.clone())
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::read_response(url, response).await
    }
}
