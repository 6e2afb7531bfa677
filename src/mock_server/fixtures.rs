//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::models::{
    Build, Component, EmailSubscription, ProductVersion, Project, Release, ResultStatus,
    RunStatus, SubscriptionInfo, SystemConfigurationKind, TestResult, Testcase, Testrun,
    TestrunGroup,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    pub const PROJECT_ID: &'static str = "5140b4b7e4b0b0e3c4d2c8a1";
    pub const RELEASE_ID: &'static str = "5140b4b7e4b0b0e3c4d2c8a2";
    pub const BUILD_ID: &'static str = "5140b4b7e4b0b0e3c4d2c8a3";
    pub const TESTCASE_ID: &'static str = "5140b4b7e4b0b0e3c4d2c8b1";
    pub const TESTRUN_ID: &'static str = "5140b4b7e4b0b0e3c4d2c8c1";
    pub const GROUP_ID: &'static str = "5140b4b7e4b0b0e3c4d2c8d1";

    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// A project with only an id and name.
    pub fn project(id: &str, name: &str) -> Project {
        Project {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn release(id: &str, name: &str, builds: Vec<Build>) -> Release {
        Release {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            builds: Some(builds),
            ..Default::default()
        }
    }

    pub fn build(id: &str, name: &str) -> Build {
        Build {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            built: Utc.timestamp_millis_opt(1_363_120_000_000).single(),
            ..Default::default()
        }
    }

    /// A project with one release, one build and one component.
    pub fn full_project(id: &str, name: &str) -> Project {
        let mut project = Self::project(id, name);
        project.releases = Some(vec![Self::release(
            Self::RELEASE_ID,
            "1.0",
            vec![Self::build(Self::BUILD_ID, "42")],
        )]);
        project.default_release = Some(Self::RELEASE_ID.to_string());
        project.components = Some(vec![Component {
            id: Some("5140b4b7e4b0b0e3c4d2c8a4".to_string()),
            name: Some("Login".to_string()),
            code: Some("login".to_string()),
            ..Default::default()
        }]);
        project
    }

    // =========================================================================
    // Testcase, Testrun and Result Fixtures
    // =========================================================================

    pub fn testcase(id: &str, name: &str, project: &Project) -> Testcase {
        Testcase {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            automated: Some(true),
            project: Some(project.create_reference()),
            ..Default::default()
        }
    }

    pub fn testrun(id: &str, name: &str, project: &Project) -> Testrun {
        Testrun {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            project: Some(project.create_reference()),
            state: Some(RunStatus::Finished),
            ..Default::default()
        }
    }

    pub fn result(id: &str, testrun: &Testrun, testcase: &Testcase, status: ResultStatus) -> TestResult {
        TestResult {
            id: Some(id.to_string()),
            testrun: Some(testrun.create_reference()),
            testcase: Some(testcase.create_reference()),
            status: Some(status),
            runstatus: Some(RunStatus::Finished),
            hostname: Some("build-agent-1".to_string()),
            ..Default::default()
        }
    }

    pub fn testrun_group(id: &str, name: &str) -> TestrunGroup {
        TestrunGroup {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            testruns: Some(Vec::new()),
            ..Default::default()
        }
    }

    // =========================================================================
    // System Fixtures
    // =========================================================================

    pub fn email_subscription(id: &str, address: &str, project: &Project) -> EmailSubscription {
        let mut subscription = EmailSubscription::new_configuration();
        subscription.common.id = Some(id.to_string());
        subscription.common.name = Some(address.to_string());
        subscription.enabled = Some(true);
        subscription.subscriptions = Some(vec![SubscriptionInfo {
            subscription_type: Some("Project".to_string()),
            subscription_value: project.id.clone(),
            on_start: Some(false),
        }]);
        subscription
    }

    pub fn version() -> ProductVersion {
        ProductVersion {
            product_name: Some("slick".to_string()),
            version_string: Some("1.0.2-SNAPSHOT".to_string()),
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// The data every [`MockServer::start`](super::MockServer::start) serves.
    pub fn default_scenario() -> DefaultScenario {
        let project = Self::full_project(Self::PROJECT_ID, "Test Project");
        let testcase = Self::testcase(Self::TESTCASE_ID, "Login works", &project);
        let testrun = Self::testrun(Self::TESTRUN_ID, "Nightly", &project);
        let results = vec![
            Self::result("5140b4b7e4b0b0e3c4d2c8e1", &testrun, &testcase, ResultStatus::Pass),
            Self::result("5140b4b7e4b0b0e3c4d2c8e2", &testrun, &testcase, ResultStatus::Fail),
        ];
        let subscriptions = vec![Self::email_subscription(
            "5140b4b7e4b0b0e3c4d2c8f1",
            "qa@example.com",
            &project,
        )];

        DefaultScenario {
            version: Self::version(),
            testcases: vec![testcase],
            testruns: vec![testrun],
            results,
            testrungroups: vec![Self::testrun_group(Self::GROUP_ID, "Week 11")],
            subscriptions,
            projects: vec![project, Self::project("5140b4b7e4b0b0e3c4d2c8a9", "Empty Project")],
        }
    }
}

/// A complete set of test data.
#[derive(Debug, Clone)]
pub struct DefaultScenario {
    pub version: ProductVersion,
    pub projects: Vec<Project>,
    pub testcases: Vec<Testcase>,
    pub testruns: Vec<Testrun>,
    pub results: Vec<TestResult>,
    pub testrungroups: Vec<TestrunGroup>,
    pub subscriptions: Vec<EmailSubscription>,
}
