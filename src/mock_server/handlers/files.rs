//! Stored file chunk uploads.

use axum::response::Response;

use super::{not_found, ok};
use crate::mock_server::state::MockState;

/// POST /api/files/{id}/addchunk
pub fn add_chunk(state: &mut MockState, file_id: &str, chunk: Vec<u8>) -> Response {
    match state.add_chunk(file_id, chunk) {
        Some(file) => ok(file),
        None => not_found(&format!("files/{file_id}")),
    }
}
