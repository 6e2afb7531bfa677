//! Project lookup by name.

use axum::response::Response;

use super::{not_found, ok};
use crate::mock_server::state::MockState;

/// GET /api/projects/byname/{name}
pub fn get_project_by_name(state: &MockState, name: &str) -> Response {
    match state.project_named(name) {
        Some(project) => ok(project.clone()),
        None => not_found(&format!("projects/byname/{name}")),
    }
}
