//! Mock Hoopla API server.
//!
//! Provides an axum-based HTTP server that simulates the Hoopla API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;

use super::fixtures::Fixtures;
use super::handlers::{self, AppState};
use super::state::MockState;

/// A mock Hoopla API server for testing.
///
/// The server runs in the background and can be used to test the Hoopla
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening, ending in `/`.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{}/", addr);

        let app = Self::create_router(AppState {
            data: shared_state.clone(),
            base_url: Arc::from(url.as_str()),
        });

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// This is the API root; use it when creating a `HooplaClient`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    fn create_router(app: AppState) -> Router {
        let api = Router::new()
            // Root document
            .route("/", get(handlers::get_root))
            // User and team routes
            .route("/users", get(handlers::list_users))
            .route("/users/:id", get(handlers::get_user))
            .route("/teams", get(handlers::list_teams))
            .route("/teams/:id", get(handlers::get_team))
            // Metric routes
            .route("/metrics", get(handlers::list_metrics))
            .route("/metrics/:id", get(handlers::get_metric))
            .route(
                "/metrics/:id/values",
                get(handlers::list_metric_values).post(handlers::create_metric_value),
            )
            .route(
                "/metrics/:id/values/:value_id",
                get(handlers::get_metric_value)
                    .put(handlers::update_metric_value)
                    .delete(handlers::delete_metric_value),
            )
            // Newsflash routes
            .route(
                "/newsflashes",
                get(handlers::list_newsflashes).post(handlers::create_newsflash),
            )
            .route("/newsflashes/:id", get(handlers::get_newsflash))
            .route(
                "/newsflashes/:id/events",
                post(handlers::create_newsflash_event),
            )
            .route(
                "/newsflashes/:id/events/:event_id",
                get(handlers::get_newsflash_event),
            )
            .route_layer(
                ServiceBuilder::new().layer(middleware::from_fn_with_state(
                    app.clone(),
                    handlers::require_token,
                )),
            );

        Router::new()
            .merge(api)
            .route("/oauth2/token", post(handlers::issue_token))
            // Health check
            .route("/health", get(health_check))
            .with_state(app)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
