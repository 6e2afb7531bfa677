//! Testcase models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none};

use crate::fields::{EpochMillis, Integer};
use crate::model::impl_model;
use crate::models::{ComponentReference, DataDrivenPropertyType, ProjectReference};

/// Stored description of a testcase query, as embedded in testplans.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestcaseQueryDescription {
    pub query_description: Option<String>,
    pub class_name: Option<String>,
}
impl_model!(TestcaseQueryDescription);

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTestcaseQuery {
    pub name: Option<String>,
    pub query: Option<TestcaseQueryDescription>,
}
impl_model!(NamedTestcaseQuery);

/// One manual step of a testcase.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub name: Option<String>,
    pub expected_result: Option<String>,
}
impl_model!(Step);

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestcaseReference {
    pub testcase_id: Option<String>,
    pub name: Option<String>,
    pub automation_id: Option<String>,
    pub automation_key: Option<String>,
    pub automation_tool: Option<String>,
}
impl_model!(TestcaseReference);

/// A testcase definition.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testcase {
    pub id: Option<String>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub created: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub purpose: Option<String>,
    pub requirements: Option<String>,
    pub steps: Option<Vec<Step>>,
    pub author: Option<String>,
    pub attributes: Option<serde_json::Value>,
    pub automated: Option<bool>,
    #[serde_as(as = "Option<Integer>")]
    pub automation_priority: Option<i64>,
    pub automation_tool: Option<String>,
    pub automation_configuration: Option<String>,
    pub automation_id: Option<String>,
    pub automation_key: Option<String>,
    #[serde_as(as = "Option<Integer>")]
    pub stability_rating: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub project: Option<ProjectReference>,
    pub component: Option<ComponentReference>,
    pub data_driven: Option<Vec<DataDrivenPropertyType>>,
    pub deleted: Option<bool>,
}
impl_model!(Testcase, id);

impl Testcase {
    pub fn create_reference(&self) -> TestcaseReference {
        TestcaseReference {
            testcase_id: self.id.clone(),
            name: self.name.clone(),
            automation_id: self.automation_id.clone(),
            automation_key: self.automation_key.clone(),
            automation_tool: self.automation_tool.clone(),
        }
    }
}
