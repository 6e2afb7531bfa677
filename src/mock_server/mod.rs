//! Mock slick server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the slick
//! REST API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server keeps state across
//! requests, so created items can be read, updated and removed again.
//!
//! # Example
//!
//! ```ignore
//! use slickqa::mock_server::MockServer;
//! use slickqa::SlickConnection;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let slick = SlickConnection::new(server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let project = slick.projects().find_by_name("Test Project").await.unwrap();
//!     assert_eq!(project.name.as_deref(), Some("Test Project"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, MOCK_CHUNK_SIZE};
