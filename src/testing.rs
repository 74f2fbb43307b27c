//! In-memory session for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::session::{HttpResponse, Session};

/// A request as seen by [`FakeSession`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

/// Session that records requests and replays queued responses.
///
/// With no queued response every request gets `200 {}`.
#[derive(Debug, Default)]
pub(crate) struct FakeSession {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<(u16, String)>>,
}

impl FakeSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shared() -> Arc<dyn Session> {
        Self::new()
    }

    /// Queue a response with a JSON body.
    pub fn respond(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        url: &str,
        params: &[(&str, &str)],
        content_type: Option<&str>,
        body: Option<&Value>,
    ) -> HttpResponse {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            content_type: content_type.map(str::to_string),
            body: body.cloned(),
        });

        let (status, text) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((200, "{}".to_string()));
        HttpResponse {
            status,
            reason: reason(status).to_string(),
            url: url.to_string(),
            text,
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "",
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<HttpResponse> {
        Ok(self.record("GET", url, params, None, None))
    }

    async fn post(&self, url: &str, content_type: &str, body: &Value) -> Result<HttpResponse> {
        Ok(self.record("POST", url, &[], Some(content_type), Some(body)))
    }

    async fn put(&self, url: &str, content_type: &str, body: &Value) -> Result<HttpResponse> {
        Ok(self.record("PUT", url, &[], Some(content_type), Some(body)))
    }

    async fn delete(&self, url: &str) -> Result<HttpResponse> {
        Ok(self.record("DELETE", url, &[], None, None))
    }
}
