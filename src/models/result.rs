//! Test result models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none};

use crate::fields::{EpochMillis, Integer};
use crate::model::impl_model;
use crate::models::{
    BuildReference, ComponentReference, ConfigurationOverride, ConfigurationReference, Link,
    ProjectReference, ReleaseReference, RunStatus, StoredFile, TestcaseReference,
    TestrunReference,
};

/// Outcome of a single test.
///
/// Statuses this client doesn't know are kept verbatim in `Other`, so
/// they survive a read-modify-write round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Pass,
    Fail,
    BrokenTest,
    NotTested,
    Skipped,
    NoResult,
    Cancelled,
    PassedOnRetry,
    #[serde(untagged)]
    Other(String),
}

impl ResultStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ResultStatus::Pass => "PASS",
            ResultStatus::Fail => "FAIL",
            ResultStatus::BrokenTest => "BROKEN_TEST",
            ResultStatus::NotTested => "NOT_TESTED",
            ResultStatus::Skipped => "SKIPPED",
            ResultStatus::NoResult => "NO_RESULT",
            ResultStatus::Cancelled => "CANCELLED",
            ResultStatus::PassedOnRetry => "PASSED_ON_RETRY",
            ResultStatus::Other(status) => status,
        }
    }

    /// Whether the status counts as a pass.
    pub fn is_passing(&self) -> bool {
        matches!(self, ResultStatus::Pass | ResultStatus::PassedOnRetry)
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A log line recorded against a result.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde_as(as = "Option<EpochMillis>")]
    pub entry_time: Option<DateTime<Utc>>,
    pub level: Option<String>,
    pub logger_name: Option<String>,
    pub message: Option<String>,
    pub exception_class_name: Option<String>,
    pub exception_message: Option<String>,
    pub exception_stack_trace: Option<Vec<String>>,
}
impl_model!(LogEntry);

impl LogEntry {
    /// A log entry stamped with the current time.
    pub fn now(level: impl Into<String>, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entry_time: Some(Utc::now()),
            level: Some(level.into()),
            logger_name: Some(logger_name.into()),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Record the exception that caused this entry.
    ///
    /// ```
    /// use slickqa::models::LogEntry;
    ///
    /// let entry = LogEntry::now("ERROR", "ui", "login failed").with_exception(
    ///     "TimeoutError",
    ///     "no dashboard after 30s",
    ///     ["at login (login.rs:42)", "at main (main.rs:7)"],
    /// );
    /// assert_eq!(entry.exception_stack_trace.map(|t| t.len()), Some(2));
    /// ```
    pub fn with_exception<S>(
        mut self,
        class_name: impl Into<String>,
        message: impl Into<String>,
        stack_trace: impl IntoIterator<Item = S>,
    ) -> Self
    where
        S: Into<String>,
    {
        self.exception_class_name = Some(class_name.into());
        self.exception_message = Some(message.into());
        self.exception_stack_trace = Some(stack_trace.into_iter().map(Into::into).collect());
        self
    }
}

/// Entry in a result's history of earlier outcomes.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultReference {
    pub result_id: Option<String>,
    pub status: Option<ResultStatus>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub recorded: Option<DateTime<Utc>>,
    pub build: Option<BuildReference>,
}
impl_model!(ResultReference);

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphColumnReference {
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    pub name: Option<String>,
}
impl_model!(GraphColumnReference);

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphValueReference {
    #[serde_as(as = "Option<EpochMillis>")]
    pub date: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<Vec<Integer>>")]
    pub measurements: Option<Vec<i64>>,
}
impl_model!(GraphValueReference);

/// Measurements charted alongside a result.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub columns: Option<Vec<GraphColumnReference>>,
    pub values: Option<Vec<GraphValueReference>>,
}
impl_model!(Graph);

/// The result of running one testcase within a testrun.
///
/// Stored by slick in the `results` collection.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: Option<String>,
    pub testrun: Option<TestrunReference>,
    pub config: Option<ConfigurationReference>,
    pub configuration_override: Option<Vec<ConfigurationOverride>>,
    pub testcase: Option<TestcaseReference>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub recorded: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub started: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub finished: Option<DateTime<Utc>>,
    pub status: Option<ResultStatus>,
    pub runstatus: Option<RunStatus>,
    pub reason: Option<String>,
    pub attributes: Option<serde_json::Value>,
    pub files: Option<Vec<StoredFile>>,
    pub links: Option<Vec<Link>>,
    pub log: Option<Vec<LogEntry>>,
    pub project: Option<ProjectReference>,
    pub component: Option<ComponentReference>,
    pub release: Option<ReleaseReference>,
    pub build: Option<BuildReference>,
    #[serde_as(as = "Option<Integer>")]
    pub runlength: Option<i64>,
    pub history: Option<Vec<ResultReference>>,
    pub hostname: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub graph: Option<Graph>,
}
impl_model!(TestResult, id, url = "results");

/// Check-in status of a test runner host.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostStatus {
    pub hostname: Option<String>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub last_check_in: Option<DateTime<Utc>>,
    pub current_work: Option<TestResult>,
}
impl_model!(HostStatus, url = "hoststatus");
