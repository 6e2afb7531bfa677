//! Typed query documents for `find` operations.
//!
//! Slick itself has no notion of these types; they only document which
//! query-string options each endpoint understands. Any serializable
//! value works as a query: one of these structs, a map, or a slice of
//! `(key, value)` pairs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use serde_with::{serde_as, skip_serializing_none};

use crate::error::Result;
use crate::fields::EpochMillis;
use crate::models::{ResultStatus, RunStatus};

/// Flatten a query into URL query-string pairs.
///
/// Objects contribute one pair per non-null member (arrays repeat the
/// key). Sequences of two-element arrays are read as `(key, value)`
/// pairs. Anything else yields no pairs.
pub fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    match serde_json::to_value(query)? {
        Value::Object(map) => {
            for (key, value) in map {
                push_value(&mut pairs, key, value);
            }
        }
        Value::Array(items) => {
            for item in items {
                if let Value::Array(mut kv) = item {
                    if kv.len() == 2 {
                        let value = kv.pop().unwrap_or(Value::Null);
                        if let Some(key) = kv.pop().and_then(scalar_to_string) {
                            push_value(&mut pairs, key, value);
                        }
                    }
                }
            }
        }
        _ => {}
    }
    Ok(pairs)
}

fn push_value(pairs: &mut Vec<(String, String)>, key: String, value: Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                if let Some(text) = scalar_to_string(item) {
                    pairs.push((key.clone(), text));
                }
            }
        }
        other => {
            if let Some(text) = scalar_to_string(other) {
                pairs.push((key, text));
            }
        }
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Query for project configurations.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationQuery {
    pub name: Option<String>,
    /// Known types are `PROJECT` and `ENVIRONMENT`.
    pub configuration_type: Option<String>,
    pub filename: Option<String>,
}

impl ConfigurationQuery {
    pub fn environment(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            configuration_type: Some("ENVIRONMENT".to_string()),
            filename: None,
        }
    }
}

/// Query for system configurations by type and name.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemConfigurationQuery {
    #[serde(rename = "config-type")]
    pub config_type: Option<String>,
    pub name: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultQuery {
    pub testrunid: Option<String>,
    pub status: Option<ResultStatus>,
    pub excludestatus: Option<ResultStatus>,
    pub runstatus: Option<RunStatus>,
    pub allfields: Option<bool>,
}

impl ResultQuery {
    pub fn for_testrun(testrun_id: impl Into<String>) -> Self {
        Self {
            testrunid: Some(testrun_id.into()),
            ..Default::default()
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestcaseQuery {
    pub projectid: Option<String>,
    pub componentid: Option<String>,
    pub automation_key: Option<String>,
    pub automation_id: Option<String>,
    pub automation_tool: Option<String>,
    pub tag: Option<String>,
    pub automated: Option<bool>,
    pub author: Option<String>,
    pub namecontains: Option<String>,
    pub name: Option<String>,
}

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestrunGroupQuery {
    #[serde_as(as = "Option<EpochMillis>")]
    pub createdafter: Option<DateTime<Utc>>,
    pub name: Option<String>,
}

/// Query for testplans; the project is required by the server.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct TestplanQuery {
    pub projectid: String,
    pub createdby: Option<String>,
    pub name: Option<String>,
}

impl TestplanQuery {
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            projectid: project_id.into(),
            createdby: None,
            name: None,
        }
    }
}

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestrunQuery {
    pub projectid: Option<String>,
    pub releaseid: Option<String>,
    pub buildid: Option<String>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub createdafter: Option<DateTime<Utc>>,
    pub configid: Option<String>,
    pub testplanid: Option<String>,
    pub config_name: Option<String>,
    pub project_name: Option<String>,
    pub release_name: Option<String>,
    pub build_name: Option<String>,
    pub name: Option<String>,
    pub limit: Option<u32>,
}

/// Host statuses checked in within the last `checkincutoff` minutes
/// (server default 5).
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostStatusQuery {
    pub checkincutoff: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    #[test]
    fn test_typed_query_pairs_skip_unset() {
        let query = ConfigurationQuery {
            configuration_type: Some("ENVIRONMENT".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query_pairs(&query).unwrap(),
            vec![("configurationType".to_string(), "ENVIRONMENT".to_string())]
        );
    }

    #[test]
    fn test_map_query_pairs() {
        let mut query = BTreeMap::new();
        query.insert("name", "Nightly");
        query.insert("projectid", "p1");
        assert_eq!(
            query_pairs(&query).unwrap(),
            vec![
                ("name".to_string(), "Nightly".to_string()),
                ("projectid".to_string(), "p1".to_string()),
            ]
        );
    }

    #[test]
    fn test_pair_slice_query_pairs() {
        let pairs = query_pairs(&[("projectid", "p1"), ("name", "Login works")]).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("projectid".to_string(), "p1".to_string()),
                ("name".to_string(), "Login works".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_string_values() {
        let query = ResultQuery {
            status: Some(ResultStatus::Fail),
            allfields: Some(true),
            ..Default::default()
        };
        let pairs = query_pairs(&query).unwrap();
        assert!(pairs.contains(&("status".to_string(), "FAIL".to_string())));
        assert!(pairs.contains(&("allfields".to_string(), "true".to_string())));
    }

    #[test]
    fn test_system_configuration_query_key() {
        let query = SystemConfigurationQuery {
            config_type: Some("email-subscription".to_string()),
            name: None,
        };
        assert_eq!(
            serde_qs::to_string(&query).unwrap(),
            "config-type=email-subscription"
        );
    }

    #[test]
    fn test_created_after_is_epoch_millis() {
        let query = TestrunQuery {
            createdafter: Some(Utc.timestamp_millis_opt(1_000).unwrap()),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(serde_qs::to_string(&query).unwrap(), "createdafter=1000&limit=5");
    }

    #[test]
    fn test_testplan_query_requires_project() {
        let query = TestplanQuery::for_project("p1");
        assert_eq!(serde_qs::to_string(&query).unwrap(), "projectid=p1");
    }

    #[test]
    fn test_unit_query_has_no_pairs() {
        assert!(query_pairs(&()).unwrap().is_empty());
    }
}
