//! Slick test result tracking client library.
//!
//! A Rust library for reporting projects, releases, builds, testcases,
//! testruns and results to a [Slick](https://github.com/slickqa/slick)
//! server, and for reading them back through its REST API.
//!
//! # Quick Start
//!
//! ```no_run
//! use slickqa::models::{Project, TestResult, ResultStatus};
//! use slickqa::queries::ResultQuery;
//! use slickqa::SlickConnection;
//!
//! #[tokio::main]
//! async fn main() -> slickqa::Result<()> {
//!     let slick = SlickConnection::new("http://slick.example.com:8080")?;
//!
//!     // Look a project up by name, or create it
//!     let project = match slick.projects().find_by_name("Acme").await {
//!         Ok(project) => project,
//!         Err(_) => slick.projects().create(&Project::named("Acme")).await?,
//!     };
//!     println!("Project id: {:?}", project.id);
//!
//!     // Failed results of one testrun
//!     let failed: Vec<TestResult> = slick
//!         .results()
//!         .find(&ResultQuery {
//!             status: Some(ResultStatus::Fail),
//!             ..ResultQuery::for_testrun("5140b4b7e4b0b0e3c4d2c8a1")
//!         })
//!         .await?;
//!     println!("{} failures", failed.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! [`SlickConnection`] is the root of a tree of [`ApiPart`]s that mirrors
//! slick's URL layout. A part is narrowed to one item with
//! [`ApiPart::with`] or [`ApiPart::with_id`], descends with accessors
//! such as `releases()` and `builds()`, and ends with one verb:
//! `find`, `find_one`, `get`, `create`, `update` or `remove`.
//!
//! Every request is retried per [`RetryPolicy`]; only HTTP 200 counts
//! as success.
//!
//! # Configuration
//!
//! [`SlickConnection::from_env`] reads:
//!
//! - `SLICK_URL` (required) - server URL, `/api` is appended if missing
//! - `SLICK_RETRY_ATTEMPTS` (optional) - attempts per request, default 3
//! - `SLICK_RETRY_CLIENT_ERRORS` (optional) - `false` fails fast on 4xx
//! - `SLICK_TIMEOUT_SECS` (optional) - per-request timeout

mod api;
mod client;
mod config;
mod connection;
mod error;
pub mod fields;
mod handles;
pub mod model;
pub mod models;
pub mod queries;
mod retry;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use api::{ApiPart, FindOneMode, SystemConfigurationPart, DEFAULT_CHUNK_SIZE};
pub use client::SlickClient;
pub use config::SlickConfig;
pub use connection::SlickConnection;
pub use error::{Result, SlickError};
pub use model::Model;
pub use retry::{RetryOn, RetryPolicy, DEFAULT_MAX_ATTEMPTS};

// Re-export handles and traits
pub use handles::{ResultHandle, TestrunHandle};
pub use traits::Attachable;

// Re-export models most callers need
pub use models::{
    Build, Component, Project, Release, ResultStatus, RunStatus, StoredFile, SystemConfigurationKind,
    TestResult, Testcase, Testplan, Testrun, TestrunGroup,
};
