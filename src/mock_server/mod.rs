//! Mock Hoopla API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Hoopla
//! API for integration and end-to-end testing. Unlike wiremock which mocks
//! at the HTTP level per-test, this server maintains state across requests
//! and serves real `links`, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use hoopla::mock_server::MockServer;
//! use hoopla::HooplaClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = HooplaClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let root = client.connect().await.unwrap();
//!     let user = root.find_user_by_email("ada@example.com").await.unwrap();
//!     assert!(user.is_some());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::{
    MockMetric, MockMetricValue, MockNewsflash, MockNewsflashEvent, MockOwner, MockState,
    MockTeam, MockUser,
};
