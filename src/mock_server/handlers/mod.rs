//! HTTP request handlers for the mock server.
//!
//! Every representation carries absolute `href`s and `links` built from the
//! address the server is bound to, so clients only ever follow links.

pub mod metrics;
pub mod newsflashes;
pub mod people;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Form, Json,
};
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use crate::mock_server::state::{MockOwner, MockState};
use crate::GENERIC_URN_PREFIX;

pub use metrics::*;
pub use newsflashes::*;
pub use people::*;

/// Token handed out when no required token is configured.
pub const DEFAULT_TOKEN: &str = "mock-token";

/// Lifetime of issued tokens, in seconds.
const TOKEN_TTL: u64 = 3600;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<RwLock<MockState>>,
    /// Server root, always ending in `/`.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Absolute URL for a path below the root.
    pub fn href(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Id of a record from its absolute href, e.g. `users/4` under the root.
    fn id_from_href(&self, href: &str, collection: &str) -> Option<u64> {
        href.strip_prefix(self.base_url.as_ref())?
            .strip_prefix(collection)?
            .strip_prefix('/')?
            .parse()
            .ok()
    }

    /// Tagged reference for an owner.
    pub fn owner_json(&self, owner: &MockOwner) -> Value {
        match owner {
            MockOwner::User(id) => json!({"kind": "user", "href": self.href(&format!("users/{id}"))}),
            MockOwner::Team(id) => json!({"kind": "team", "href": self.href(&format!("teams/{id}"))}),
            MockOwner::Generic(token) => {
                json!({"kind": "generic", "href": format!("{GENERIC_URN_PREFIX}{token}")})
            }
        }
    }

    /// Parse a tagged reference sent by a client.
    pub fn parse_owner(&self, value: &Value) -> Option<MockOwner> {
        let kind = value.get("kind")?.as_str()?;
        let href = value.get("href")?.as_str()?;
        self.parse_owner_href(kind, href)
    }

    /// Parse an owner from its href alone, as used in the `owner` query filter.
    pub fn parse_owner_filter(&self, href: &str) -> Option<MockOwner> {
        if href.starts_with(GENERIC_URN_PREFIX) {
            self.parse_owner_href("generic", href)
        } else if self.id_from_href(href, "users").is_some() {
            self.parse_owner_href("user", href)
        } else {
            self.parse_owner_href("team", href)
        }
    }

    fn parse_owner_href(&self, kind: &str, href: &str) -> Option<MockOwner> {
        match kind {
            "user" => self.id_from_href(href, "users").map(MockOwner::User),
            "team" => self.id_from_href(href, "teams").map(MockOwner::Team),
            "generic" => href
                .strip_prefix(GENERIC_URN_PREFIX)
                .map(|token| MockOwner::Generic(token.to_string())),
            _ => None,
        }
    }
}

/// Build a `links` array from (rel, path) pairs.
pub fn links(app: &AppState, rels: &[(&str, String)]) -> Value {
    Value::Array(
        rels.iter()
            .map(|(rel, path)| json!({"rel": rel, "href": app.href(path)}))
            .collect(),
    )
}

/// JSON error body with a status code.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": status.canonical_reason().unwrap_or("error"),
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn not_found(entity: &str, id: u64) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("No {entity} found with id: {id}"),
    )
}

/// Writes must use a vendor media type with the `+json` suffix.
pub fn require_vendor_json(headers: &HeaderMap, media_type: &str) -> Result<(), Response> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if content_type == format!("{media_type}+json") {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("expected content type {media_type}+json, got '{content_type}'"),
        ))
    }
}

/// Copy the fields of a request body, ignoring `href` and `links`.
pub fn writable_fields(body: &Value) -> Map<String, Value> {
    body.as_object()
        .map(|fields| {
            fields
                .iter()
                .filter(|(name, _)| name.as_str() != "href" && name.as_str() != "links")
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// GET /
pub async fn get_root(State(app): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "href": app.href(""),
        "links": links(&app, &[
            ("list_users", "users".to_string()),
            ("list_teams", "teams".to_string()),
            ("list_metrics", "metrics".to_string()),
            ("list_newsflashes", "newsflashes".to_string()),
            ("create_newsflash", "newsflashes".to_string()),
        ]),
    }))
}

/// Form body of a token request.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
}

/// POST /oauth2/token
pub async fn issue_token(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(request): Form<TokenRequest>,
) -> Response {
    if request.grant_type != "client_credentials" {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("unsupported grant type '{}'", request.grant_type),
        );
    }

    let Some((client_id, client_secret)) = basic_credentials(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "missing client credentials");
    };

    let state = app.data.read().await;
    if let Some((expected_id, expected_secret)) = &state.credentials {
        if &client_id != expected_id || &client_secret != expected_secret {
            return error_response(StatusCode::UNAUTHORIZED, "invalid client credentials");
        }
    }

    let token = state
        .required_token
        .clone()
        .unwrap_or_else(|| DEFAULT_TOKEN.to_string());

    Json(json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": TOKEN_TTL,
    }))
    .into_response()
}

/// Decode an `Authorization: Basic` header.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let encoded = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Basic ")?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, secret) = decoded.split_once(':')?;
    Some((id.to_string(), secret.to_string()))
}

/// Reject API requests without the required bearer token.
pub async fn require_token(State(app): State<AppState>, request: Request, next: Next) -> Response {
    let required = app.data.read().await.required_token.clone();
    if let Some(required) = required {
        let presented = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if presented != Some(required.as_str()) {
            return error_response(StatusCode::UNAUTHORIZED, "invalid or missing bearer token");
        }
    }
    next.run(request).await
}
