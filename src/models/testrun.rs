//! Testplan, testrun and testrun group models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none};

use crate::fields::{EpochMillis, Integer};
use crate::model::impl_model;
use crate::models::{
    BuildReference, ConfigurationReference, Link, NamedTestcaseQuery, ProjectReference,
    ReleaseReference, StoredFile,
};

/// Lifecycle state of a testrun or result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Scheduled,
    ToBeRun,
    Running,
    Finished,
    /// A state this client doesn't know, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Scheduled => "SCHEDULED",
            RunStatus::ToBeRun => "TO_BE_RUN",
            RunStatus::Running => "RUNNING",
            RunStatus::Finished => "FINISHED",
            RunStatus::Other(state) => state,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the testruns of a group relate to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupType {
    Parallel,
    Serial,
    #[serde(untagged)]
    Other(String),
}

/// A plan grouping testcase queries for a project.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testplan {
    pub id: Option<String>,
    pub name: Option<String>,
    pub created_by: Option<String>,
    pub project: Option<ProjectReference>,
    pub shared_with: Option<Vec<String>>,
    pub isprivate: Option<bool>,
    pub queries: Option<Vec<NamedTestcaseQuery>>,
}
impl_model!(Testplan, id);

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationOverride {
    pub key: Option<String>,
    pub value: Option<String>,
    pub is_requirement: Option<bool>,
}
impl_model!(ConfigurationOverride);

/// Parameters for scheduling a testplan run.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestplanRunParameters {
    pub config: Option<ConfigurationReference>,
    pub runtime_options: Option<ConfigurationReference>,
    pub release: Option<ReleaseReference>,
    pub build: Option<BuildReference>,
    pub configuration_override: Option<Vec<ConfigurationOverride>>,
}
impl_model!(TestplanRunParameters);

/// Result counts keyed by status name.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ResultsByStatus {
    #[serde_as(as = "Option<Integer>")]
    pub pass: Option<i64>,
    #[serde_as(as = "Option<Integer>")]
    pub fail: Option<i64>,
    #[serde_as(as = "Option<Integer>")]
    pub broken_test: Option<i64>,
    #[serde_as(as = "Option<Integer>")]
    pub not_tested: Option<i64>,
    #[serde_as(as = "Option<Integer>")]
    pub skipped: Option<i64>,
    #[serde_as(as = "Option<Integer>")]
    pub no_result: Option<i64>,
    #[serde_as(as = "Option<Integer>")]
    pub cancelled: Option<i64>,
    #[serde_as(as = "Option<Integer>")]
    pub passed_on_retry: Option<i64>,
}
impl_model!(ResultsByStatus);

/// Server-computed summary of a testrun.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestrunSummary {
    #[serde_as(as = "Option<Integer>")]
    pub total_time: Option<i64>,
    pub results_by_status: Option<ResultsByStatus>,
    pub status_list_ordered: Option<Vec<String>>,
    #[serde_as(as = "Option<Integer>")]
    pub total: Option<i64>,
}
impl_model!(TestrunSummary);

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestrunReference {
    pub testrun_id: Option<String>,
    pub name: Option<String>,
}
impl_model!(TestrunReference);

/// One execution of a set of tests against a build.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testrun {
    pub id: Option<String>,
    pub name: Option<String>,
    pub testplan_id: Option<String>,
    pub testplan: Option<Testplan>,
    pub config: Option<ConfigurationReference>,
    pub runtime_options: Option<ConfigurationReference>,
    pub project: Option<ProjectReference>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub run_started: Option<DateTime<Utc>>,
    /// Older servers and clients spell the key `runFinshed`; both are read.
    #[serde_as(as = "Option<EpochMillis>")]
    #[serde(alias = "runFinshed")]
    pub run_finished: Option<DateTime<Utc>>,
    pub release: Option<ReleaseReference>,
    pub build: Option<BuildReference>,
    pub summary: Option<TestrunSummary>,
    pub files: Option<Vec<StoredFile>>,
    pub links: Option<Vec<Link>>,
    pub info: Option<String>,
    pub state: Option<RunStatus>,
    pub attributes: Option<serde_json::Value>,
    pub requirements: Option<Vec<String>>,
}
impl_model!(Testrun, id);

impl Testrun {
    pub fn create_reference(&self) -> TestrunReference {
        TestrunReference {
            testrun_id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// A named collection of testruns reported together.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestrunGroup {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub created: Option<DateTime<Utc>>,
    pub testruns: Option<Vec<Testrun>>,
    pub group_type: Option<GroupType>,
    pub group_summary: Option<TestrunSummary>,
}
impl_model!(TestrunGroup, id);

impl TestrunGroup {
    /// Whether a testrun with the given id is a member of this group.
    pub fn contains(&self, testrun_id: &str) -> bool {
        self.testruns
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|t| t.id.as_deref() == Some(testrun_id))
    }
}

/// Parameters a runner reports when asking for work.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestrunParameter {
    #[serde(rename = "fulFilledRequirements")]
    pub fulfilled_requirements: Option<serde_json::Value>,
    pub automation_tool: Option<String>,
    pub hostname: Option<String>,
}
impl_model!(TestrunParameter);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    #[test]
    fn test_run_status_wire_names() {
        assert_eq!(
            serde_json::to_value(RunStatus::ToBeRun).unwrap(),
            serde_json::json!("TO_BE_RUN")
        );
        assert_eq!(RunStatus::Finished.to_string(), "FINISHED");
    }

    #[test]
    fn test_summary_counts_use_status_keys() {
        let summary = TestrunSummary::from_dict(serde_json::json!({
            "total": 3,
            "resultsByStatus": {"PASS": 2, "FAIL": "1", "PASSED_ON_RETRY": 0},
            "statusListOrdered": ["PASS", "FAIL"]
        }))
        .unwrap();

        let by_status = summary.results_by_status.unwrap();
        assert_eq!(by_status.pass, Some(2));
        assert_eq!(by_status.fail, Some(1));
        assert_eq!(by_status.passed_on_retry, Some(0));
        assert_eq!(by_status.skipped, None);
    }

    #[test]
    fn test_testrun_reference() {
        let testrun = Testrun {
            id: Some("tr1".to_string()),
            name: Some("Nightly".to_string()),
            state: Some(RunStatus::Running),
            ..Default::default()
        };
        assert_eq!(
            testrun.create_reference().to_dict().unwrap(),
            serde_json::json!({"testrunId": "tr1", "name": "Nightly"})
        );
        assert_eq!(
            testrun.to_dict().unwrap(),
            serde_json::json!({"id": "tr1", "name": "Nightly", "state": "RUNNING"})
        );
    }

    #[test]
    fn test_run_finished_reads_both_spellings() {
        let misspelled = Testrun::from_dict(serde_json::json!({
            "id": "t1",
            "runFinshed": 1_700_000_000_000_i64
        }))
        .unwrap();
        let spelled = Testrun::from_dict(serde_json::json!({
            "id": "t1",
            "runFinished": "1700000000000"
        }))
        .unwrap();

        assert!(misspelled.run_finished.is_some());
        assert_eq!(misspelled.run_finished, spelled.run_finished);
        assert_eq!(
            misspelled.to_dict().unwrap(),
            serde_json::json!({"id": "t1", "runFinished": 1_700_000_000_000_i64})
        );
    }

    #[test]
    fn test_unknown_group_type_is_kept() {
        let group = TestrunGroup::from_dict(serde_json::json!({"id": "g1", "groupType": "MIXED"})).unwrap();
        assert_eq!(group.group_type, Some(GroupType::Other("MIXED".to_string())));
        assert_eq!(group.to_dict().unwrap()["groupType"], "MIXED");
    }

    #[test]
    fn test_group_membership() {
        let group = TestrunGroup::from_dict(serde_json::json!({
            "id": "g1",
            "groupType": "PARALLEL",
            "testruns": [{"id": "tr1"}, {"id": "tr2"}]
        }))
        .unwrap();
        assert_eq!(group.group_type, Some(GroupType::Parallel));
        assert!(group.contains("tr2"));
        assert!(!group.contains("tr3"));
    }
}
