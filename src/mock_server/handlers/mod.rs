//! HTTP request handlers for the mock server.
//!
//! One wildcard route per method receives every `/api/...` request; the
//! handlers split the path into segments and dispatch on their shape.

pub mod collections;
pub mod files;
pub mod projects;
pub mod testrun_groups;

pub use collections::*;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

pub type SharedState = Arc<RwLock<MockState>>;

/// Non-empty path segments.
pub(crate) fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn ok(value: Value) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

pub(crate) fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": format!("Nothing found at: {path}")
        })),
    )
        .into_response()
}

pub(crate) fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Bad request",
            "message": message
        })),
    )
        .into_response()
}
