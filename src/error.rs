//! Error types for Hoopla API operations.

use std::fmt;

use thiserror::Error;

/// Details of a failed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase for the status (e.g. "Not Found").
    pub reason: String,
    /// Raw response body.
    pub body: String,
    /// URL of the request that failed.
    pub url: String,
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} for url {}", self.status, self.reason, self.url)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

/// Errors that can occur during Hoopla API operations.
#[derive(Debug, Error)]
pub enum HooplaError {
    /// Configuration is missing or incomplete.
    #[error("Hoopla configuration required: {0}")]
    ConfigMissing(String),

    /// Access token could not be acquired.
    #[error("Authentication failed: {message}")]
    Auth {
        message: String,
        status_code: Option<u16>,
    },

    /// No resource matched a lookup.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The server rejected the request (HTTP 4xx).
    #[error("Client error: {0}")]
    ClientRequest(HttpFailure),

    /// The server failed to handle the request (HTTP 5xx).
    #[error("Server error: {0}")]
    Server(HttpFailure),

    /// Operation needs a persistent resource but `href` is absent.
    #[error("cannot {operation} {kind}: resource has no href")]
    MissingHref {
        kind: &'static str,
        operation: &'static str,
    },

    /// A transient resource was saved without a creation URL.
    #[error("cannot create {kind}: no creation URL was supplied")]
    MissingCreationUrl { kind: &'static str },

    /// The resource does not advertise the requested link relation.
    #[error("{kind} has no '{relation}' link")]
    MissingRelation {
        kind: &'static str,
        relation: String,
    },

    /// Read of a name that is neither an API attribute nor local state.
    #[error("{kind} has no attribute '{name}'")]
    UnknownAttribute { kind: &'static str, name: String },

    /// Tagged reference with a kind other than user, team or generic.
    #[error("unknown owner kind '{0}'")]
    UnknownOwnerKind(String),

    /// Tagged reference that does not have the expected shape.
    #[error("malformed reference: {0}")]
    MalformedReference(String),

    /// Response body did not have the expected JSON shape.
    #[error("unexpected response from {url}: expected {expected}")]
    UnexpectedBody { url: String, expected: &'static str },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl HooplaError {
    /// Returns true for programmatic misuse of the resource layer.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingHref { .. }
                | Self::MissingCreationUrl { .. }
                | Self::MissingRelation { .. }
                | Self::UnknownAttribute { .. }
                | Self::UnknownOwnerKind(_)
                | Self::MalformedReference(_)
        )
    }

    /// HTTP status code carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ClientRequest(failure) | Self::Server(failure) => Some(failure.status),
            Self::Auth { status_code, .. } => *status_code,
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Hoopla operations.
pub type Result<T> = core::result::Result<T, HooplaError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(status: u16) -> HttpFailure {
        HttpFailure {
            status,
            reason: "Not Found".to_string(),
            body: String::new(),
            url: "https://api.example/users/1".to_string(),
        }
    }

    #[test]
    fn test_http_failure_display() {
        let err = HooplaError::ClientRequest(failure(404));
        assert_eq!(
            err.to_string(),
            "Client error: 404 Not Found for url https://api.example/users/1"
        );
    }

    #[test]
    fn test_status_code() {
        assert_eq!(HooplaError::Server(failure(503)).status_code(), Some(503));
        assert_eq!(
            HooplaError::UnknownOwnerKind("robot".into()).status_code(),
            None
        );
    }

    #[test]
    fn test_contract_violation_classification() {
        assert!(HooplaError::MissingHref {
            kind: "user",
            operation: "reload"
        }
        .is_contract_violation());
        assert!(HooplaError::MissingRelation {
            kind: "metric",
            relation: "list_metric_values".into()
        }
        .is_contract_violation());
        assert!(!HooplaError::ClientRequest(failure(400)).is_contract_violation());
    }
}
