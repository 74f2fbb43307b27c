//! Session boundary between resources and the HTTP transport.
//!
//! A [`Session`] performs already-authenticated HTTP verbs and hands back the
//! raw [`HttpResponse`]. It never interprets status codes; classification into
//! client and server errors happens in [`HttpResponse::error_for_status`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{HooplaError, HttpFailure, Result};

/// An authenticated connection to the API.
///
/// [`HooplaClient`](crate::HooplaClient) is the production implementation.
#[async_trait]
pub trait Session: Send + Sync {
    /// Issue a GET with optional query parameters.
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<HttpResponse>;

    /// Issue a POST with a JSON body sent under `content_type`.
    async fn post(&self, url: &str, content_type: &str, body: &Value) -> Result<HttpResponse>;

    /// Issue a PUT with a JSON body sent under `content_type`.
    async fn put(&self, url: &str, content_type: &str, body: &Value) -> Result<HttpResponse>;

    /// Issue a DELETE.
    async fn delete(&self, url: &str) -> Result<HttpResponse>;
}

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase for the status.
    pub reason: String,
    /// URL the request was sent to.
    pub url: String,
    /// Raw response body.
    pub text: String,
}

impl HttpResponse {
    /// Whether the status is below 400.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Convert a 4xx status into [`HooplaError::ClientRequest`] and a 5xx
    /// status into [`HooplaError::Server`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        let failure = HttpFailure {
            status: self.status,
            reason: self.reason,
            body: self.text,
            url: self.url,
        };
        if failure.status >= 500 {
            Err(HooplaError::Server(failure))
        } else {
            Err(HooplaError::ClientRequest(failure))
        }
    }
}
