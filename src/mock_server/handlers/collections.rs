//! Generic collection and item handlers.
//!
//! Odd-length paths (`projects`, `projects/p1/releases`) name a
//! collection; even-length paths (`projects/p1`) name one item.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::{bad_request, files, not_found, ok, projects, segments, testrun_groups, SharedState};

/// GET /api/{path}
pub async fn get_any(
    State(state): State<SharedState>,
    Path(path): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let segments = segments(&path);
    let state = state.read().await;

    if let [collection, byname, name @ ..] = segments.as_slice() {
        if collection == "projects" && byname == "byname" && !name.is_empty() {
            return projects::get_project_by_name(&state, &name.join("/"));
        }
    }

    if segments.len() == 1 {
        if let Some(singleton) = state.singletons.get(&segments[0]) {
            return ok(singleton.clone());
        }
    }

    if segments.len() % 2 == 1 {
        let items: Vec<Value> = state
            .array(&segments)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| matches_query(item, &query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        return (StatusCode::OK, Json(Value::Array(items))).into_response();
    }

    match state.item(&segments) {
        Some(item) => ok(item.clone()),
        None => not_found(&path),
    }
}

/// POST /api/{path}
pub async fn post_any(
    State(state): State<SharedState>,
    Path(path): Path<String>,
    body: Bytes,
) -> Response {
    let segments = segments(&path);
    let mut state = state.write().await;

    match segments.as_slice() {
        [collection, id, action] if collection == "files" && action == "addchunk" => {
            files::add_chunk(&mut state, id, body.to_vec())
        }
        [collection, group_id, action, testrun_id] if collection == "testrungroups" && action == "addtestrun" => {
            testrun_groups::add_testrun(&mut state, group_id, testrun_id)
        }
        _ if segments.len() % 2 == 1 => {
            let item = match serde_json::from_slice::<Value>(&body) {
                Ok(item @ Value::Object(_)) => item,
                _ => return bad_request("Body must be a JSON object"),
            };
            match state.insert(&segments, item) {
                Some(created) => ok(created),
                None => not_found(&path),
            }
        }
        _ => not_found(&path),
    }
}

/// PUT /api/{path}
pub async fn put_any(
    State(state): State<SharedState>,
    Path(path): Path<String>,
    body: Bytes,
) -> Response {
    let segments = segments(&path);
    if segments.len() % 2 == 1 {
        return not_found(&path);
    }

    let changes = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(changes)) => changes,
        _ => return bad_request("Body must be a JSON object"),
    };

    let mut state = state.write().await;
    match state.merge(&segments, changes) {
        Some(updated) => ok(updated),
        None => not_found(&path),
    }
}

/// DELETE /api/{path}
pub async fn delete_any(State(state): State<SharedState>, Path(path): Path<String>) -> Response {
    let segments = segments(&path);
    let mut state = state.write().await;

    match segments.as_slice() {
        [collection, group_id, action, testrun_id] if collection == "testrungroups" && action == "removetestrun" => {
            testrun_groups::remove_testrun(&mut state, group_id, testrun_id)
        }
        _ if segments.len() % 2 == 0 => match state.remove(&segments) {
            Some(removed) => ok(removed),
            None => not_found(&path),
        },
        _ => not_found(&path),
    }
}

/// Whether an item passes every query filter it can be checked against.
///
/// A key filters only when items carry a top-level field of that name;
/// `config-type` checks `configurationType`.
fn matches_query(item: &Value, query: &[(String, String)]) -> bool {
    query.iter().all(|(key, expected)| {
        let field = if key == "config-type" {
            "configurationType"
        } else {
            key.as_str()
        };
        match item.get(field) {
            Some(Value::String(actual)) => actual == expected,
            Some(Value::Bool(actual)) => actual.to_string() == *expected,
            Some(Value::Number(actual)) => actual.to_string() == *expected,
            _ => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_matches_known_fields_only() {
        let item = json!({"name": "Nightly", "configurationType": "email-subscription"});

        assert!(matches_query(&item, &query(&[("name", "Nightly")])));
        assert!(!matches_query(&item, &query(&[("name", "Weekly")])));
        assert!(matches_query(&item, &query(&[("projectid", "p1")])));
        assert!(matches_query(&item, &query(&[("config-type", "email-subscription")])));
        assert!(!matches_query(&item, &query(&[("config-type", "amqp-system-configuration")])));
    }
}
