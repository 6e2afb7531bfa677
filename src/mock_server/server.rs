//! Mock slick server.
//!
//! Provides an axum-based HTTP server that simulates the slick REST API.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers::{self, SharedState};
use super::state::MockState;

/// A mock slick server for testing.
///
/// The server runs in the background and keeps its data in memory, so a
/// test can create items and read them back through a real connection.
pub struct MockServer {
    /// The URL where the server is listening.
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
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Base URL of the server, without the `/api` suffix.
    ///
    /// Pass it to `SlickConnection::new`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Answer the next `count` requests with HTTP 500.
    pub async fn fail_next(&self, count: u32) {
        self.state.write().await.fail_next = count;
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.state.read().await.requests.len()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new().with_singleton("version", &scenario.version);

        for project in &scenario.projects {
            state = state.with_item("projects", project);
        }
        for testcase in &scenario.testcases {
            state = state.with_item("testcases", testcase);
        }
        for testrun in &scenario.testruns {
            state = state.with_item("testruns", testrun);
        }
        for result in &scenario.results {
            state = state.with_item("results", result);
        }
        for group in &scenario.testrungroups {
            state = state.with_item("testrungroups", group);
        }
        for subscription in &scenario.subscriptions {
            state = state.with_item("system-configuration", subscription);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: SharedState) -> Router {
        Router::new()
            .route(
                "/api/*path",
                get(handlers::get_any)
                    .post(handlers::post_any)
                    .put(handlers::put_any)
                    .delete(handlers::delete_any),
            )
            // Health check
            .route("/health", get(health_check))
            .layer(middleware::from_fn_with_state(state.clone(), record_and_inject))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

/// Log every request and fail it while injected failures remain.
async fn record_and_inject(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    {
        let mut state = state.write().await;
        state
            .requests
            .push(format!("{} {}", request.method(), request.uri().path()));
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return (StatusCode::INTERNAL_SERVER_ERROR, "injected failure").into_response();
        }
    }
    next.run(request).await
}
