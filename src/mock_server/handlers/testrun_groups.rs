//! Testrun group membership.

use axum::response::Response;

use super::{not_found, ok};
use crate::mock_server::state::MockState;

/// POST /api/testrungroups/{id}/addtestrun/{testrun_id}
pub fn add_testrun(state: &mut MockState, group_id: &str, testrun_id: &str) -> Response {
    match state.add_to_group(group_id, testrun_id) {
        Some(group) => ok(group),
        None => not_found(&format!("testrungroups/{group_id}/addtestrun/{testrun_id}")),
    }
}

/// DELETE /api/testrungroups/{id}/removetestrun/{testrun_id}
pub fn remove_testrun(state: &mut MockState, group_id: &str, testrun_id: &str) -> Response {
    match state.remove_from_group(group_id, testrun_id) {
        Some(group) => ok(group),
        None => not_found(&format!("testrungroups/{group_id}")),
    }
}
