//! Project hierarchy models: projects, releases, builds, components,
//! features and configurations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none};

use crate::fields::EpochMillis;
use crate::model::impl_model;
use crate::models::StoredFile;

/// A named configuration (for example an ENVIRONMENT) attached to runs.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: Option<String>,
    pub name: Option<String>,
    pub configuration_type: Option<String>,
    pub filename: Option<String>,
    /// Free-form configuration data, passed through as-is.
    pub configuration_data: Option<serde_json::Value>,
}
impl_model!(Configuration, id);

impl Configuration {
    pub fn create_reference(&self) -> ConfigurationReference {
        ConfigurationReference {
            config_id: self.id.clone(),
            name: self.name.clone(),
            filename: self.filename.clone(),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationReference {
    pub config_id: Option<String>,
    pub name: Option<String>,
    pub filename: Option<String>,
}
impl_model!(ConfigurationReference);

/// A build of a release.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub built: Option<DateTime<Utc>>,
    pub description: Option<String>,
}
impl_model!(Build, id);

impl Build {
    pub fn create_reference(&self) -> BuildReference {
        BuildReference {
            build_id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReference {
    pub build_id: Option<String>,
    pub name: Option<String>,
}
impl_model!(BuildReference);

/// A release of a project, holding its builds.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub target: Option<DateTime<Utc>>,
    pub default_build: Option<String>,
    pub builds: Option<Vec<Build>>,
    pub status: Option<String>,
}
impl_model!(Release, id);

impl Release {
    pub fn create_reference(&self) -> ReleaseReference {
        ReleaseReference {
            release_id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    /// Find a build of this release by name.
    pub fn build_named(&self, name: &str) -> Option<&Build> {
        self.builds
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|b| b.name.as_deref() == Some(name))
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseReference {
    pub release_id: Option<String>,
    pub name: Option<String>,
}
impl_model!(ReleaseReference);

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureReference {
    pub id: Option<String>,
    pub name: Option<String>,
}
impl_model!(FeatureReference, id);

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub img_url: Option<String>,
    pub img: Option<StoredFile>,
}
impl_model!(Feature, id);

impl Feature {
    pub fn create_reference(&self) -> FeatureReference {
        FeatureReference {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReference {
    pub id: Option<String>,
    pub name: Option<String>,
    pub code: Option<String>,
}
impl_model!(ComponentReference, id);

/// A component of a project under test.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub features: Option<Vec<Feature>>,
}
impl_model!(Component, id);

impl Component {
    pub fn create_reference(&self) -> ComponentReference {
        ComponentReference {
            id: self.id.clone(),
            name: self.name.clone(),
            code: self.code.clone(),
        }
    }
}

/// Declares a data-driven property a testcase may carry.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDrivenPropertyType {
    pub name: Option<String>,
    pub requirement: Option<bool>,
    pub standard_values: Option<Vec<String>>,
}
impl_model!(DataDrivenPropertyType);

/// A slick project.
///
/// Projects are the top-level containers: they hold releases (which hold
/// builds), components, and the project configuration.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub configuration: Option<Configuration>,
    pub default_release: Option<String>,
    pub releases: Option<Vec<Release>>,
    pub inactive_releases: Option<Vec<Release>>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub last_updated: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub attributes: Option<serde_json::Value>,
    pub automation_tools: Option<Vec<String>>,
    pub components: Option<Vec<Component>>,
    pub datadriven_properties: Option<Vec<DataDrivenPropertyType>>,
}
impl_model!(Project, id);

impl Project {
    /// Create a project with only its name set, ready to be created.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn create_reference(&self) -> ProjectReference {
        ProjectReference {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    /// Find an active release by name.
    pub fn release_named(&self, name: &str) -> Option<&Release> {
        self.releases
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
    }

    /// Find a component by name.
    pub fn component_named(&self, name: &str) -> Option<&Component> {
        self.components
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|c| c.name.as_deref() == Some(name))
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReference {
    pub id: Option<String>,
    pub name: Option<String>,
}
impl_model!(ProjectReference, id);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use chrono::TimeZone;

    #[test]
    fn test_project_round_trip_keeps_only_set_fields() {
        let project = Project::named("Acme");
        let json = project.to_json().unwrap();
        assert_eq!(json, r#"{"name":"Acme"}"#);

        let back = Project::from_dict(serde_json::from_str(&json).unwrap()).unwrap();
        assert_eq!(back.name.as_deref(), Some("Acme"));
        assert!(back.id.is_none());
        assert_eq!(back, project);
    }

    #[test]
    fn test_project_from_server_json() {
        let project = Project::from_dict(serde_json::json!({
            "id": "5150",
            "name": "Acme",
            "lastUpdated": 1_600_000_000_000_i64,
            "releases": [
                {"id": "r1", "name": "1.0", "builds": [{"id": "b1", "name": "42", "built": 1_600_000_000_000_i64}]}
            ],
            "tags": ["nightly", "smoke"],
            "attributes": {"owner": "qa"},
            "somethingNew": {"ignored": true}
        }))
        .unwrap();

        assert_eq!(project.id(), Some("5150"));
        assert_eq!(
            project.last_updated,
            Some(Utc.timestamp_millis_opt(1_600_000_000_000).unwrap())
        );
        let release = project.release_named("1.0").unwrap();
        assert_eq!(release.build_named("42").and_then(|b| b.id.as_deref()), Some("b1"));
        assert_eq!(project.tags.as_ref().map(Vec::len), Some(2));
        assert_eq!(project.attributes, Some(serde_json::json!({"owner": "qa"})));
        assert!(project.components.is_none());
    }

    #[test]
    fn test_references_are_value_copies() {
        let mut project = Project {
            id: Some("p1".to_string()),
            name: Some("Acme".to_string()),
            ..Default::default()
        };
        let reference = project.create_reference();
        project.name = Some("Renamed".to_string());

        assert_eq!(reference.name.as_deref(), Some("Acme"));
        assert_eq!(reference.id.as_deref(), Some("p1"));
    }

    #[test]
    fn test_component_reference_keeps_code() {
        let component = Component {
            id: Some("c1".to_string()),
            name: Some("Login Page".to_string()),
            code: Some("Login-Page".to_string()),
            ..Default::default()
        };
        let reference = component.create_reference();
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            serde_json::json!({"id": "c1", "name": "Login Page", "code": "Login-Page"})
        );
    }

    #[test]
    fn test_configuration_reference_skips_unset_filename() {
        let config = Configuration {
            id: Some("cfg".to_string()),
            name: Some("QA Lab".to_string()),
            configuration_type: Some("ENVIRONMENT".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(config.create_reference()).unwrap(),
            serde_json::json!({"configId": "cfg", "name": "QA Lab"})
        );
    }

    #[test]
    fn test_bad_timestamp_is_a_coercion_error() {
        let result = Build::from_dict(serde_json::json!({"built": "yesterday"}));
        assert!(matches!(result, Err(crate::SlickError::ParseError(_))));
    }
}
