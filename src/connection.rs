//! The root of slick's URL tree.

use url::Url;

use crate::api::{ApiPart, SystemConfigurationPart};
use crate::client::SlickClient;
use crate::config::SlickConfig;
use crate::error::{Result, SlickError};
use crate::models::{
    Configuration, HostStatus, ProductVersion, Project, Quote, SlickUpdate, StoredFile, TestResult,
    Testcase, Testplan, Testrun, TestrunGroup,
};

#[derive(Debug, Clone)]
struct Parts {
    configurations: ApiPart<Configuration>,
    system_configurations: SystemConfigurationPart,
    version: ApiPart<ProductVersion>,
    hoststatus: ApiPart<HostStatus>,
    updates: ApiPart<SlickUpdate>,
    projects: ApiPart<Project>,
    testplans: ApiPart<Testplan>,
    testcases: ApiPart<Testcase>,
    testruns: ApiPart<Testrun>,
    testrungroups: ApiPart<TestrunGroup>,
    results: ApiPart<TestResult>,
    files: ApiPart<StoredFile>,
    quotes: ApiPart<Quote>,
}

impl Parts {
    fn new(client: &SlickClient, api_url: &str) -> Self {
        Self {
            configurations: ApiPart::new(client.clone(), api_url),
            system_configurations: SystemConfigurationPart::new(client.clone(), api_url),
            version: ApiPart::new(client.clone(), api_url),
            hoststatus: ApiPart::new(client.clone(), api_url),
            updates: ApiPart::new(client.clone(), api_url),
            projects: ApiPart::new(client.clone(), api_url),
            testplans: ApiPart::new(client.clone(), api_url),
            testcases: ApiPart::new(client.clone(), api_url),
            testruns: ApiPart::new(client.clone(), api_url),
            testrungroups: ApiPart::new(client.clone(), api_url),
            results: ApiPart::new(client.clone(), api_url),
            files: ApiPart::new(client.clone(), api_url),
            quotes: ApiPart::new(client.clone(), api_url),
        }
    }
}

/// A connection to one slick server.
///
/// Cheaply cloneable. Each accessor hands out a fresh copy of the
/// top-level part, so pending data never leaks between callers.
///
/// # Example
///
/// ```no_run
/// use slickqa::SlickConnection;
///
/// # async fn example() -> slickqa::Result<()> {
/// let slick = SlickConnection::new("http://slick.example.com:8080")?;
/// assert_eq!(slick.url(), "http://slick.example.com:8080/api");
///
/// let projects = slick.projects().find_all().await?;
/// # let _ = projects;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SlickConnection {
    api_url: String,
    client: SlickClient,
    parts: Parts,
}

impl SlickConnection {
    /// Connect with default retry and timeout settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is empty or not an http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(SlickConfig::new(base_url))
    }

    /// Connect using settings from the environment.
    ///
    /// See [`SlickConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::with_config(SlickConfig::from_env()?)
    }

    pub fn with_config(config: SlickConfig) -> Result<Self> {
        let api_url = normalize_base_url(&config.base_url)?;
        let client = SlickClient::new(&config)?;
        let parts = Parts::new(&client, &api_url);

        tracing::debug!(api_url, "Created slick connection");

        Ok(Self {
            api_url,
            client,
            parts,
        })
    }

    /// Root URL of the API, always ending in `/api`.
    pub fn url(&self) -> &str {
        &self.api_url
    }

    pub fn client(&self) -> &SlickClient {
        &self.client
    }

    pub fn configurations(&self) -> ApiPart<Configuration> {
        self.parts.configurations.clone()
    }

    pub fn system_configurations(&self) -> SystemConfigurationPart {
        self.parts.system_configurations.clone()
    }

    pub fn version(&self) -> ApiPart<ProductVersion> {
        self.parts.version.clone()
    }

    pub fn hoststatus(&self) -> ApiPart<HostStatus> {
        self.parts.hoststatus.clone()
    }

    pub fn updates(&self) -> ApiPart<SlickUpdate> {
        self.parts.updates.clone()
    }

    pub fn projects(&self) -> ApiPart<Project> {
        self.parts.projects.clone()
    }

    pub fn testplans(&self) -> ApiPart<Testplan> {
        self.parts.testplans.clone()
    }

    pub fn testcases(&self) -> ApiPart<Testcase> {
        self.parts.testcases.clone()
    }

    pub fn testruns(&self) -> ApiPart<Testrun> {
        self.parts.testruns.clone()
    }

    pub fn testrungroups(&self) -> ApiPart<TestrunGroup> {
        self.parts.testrungroups.clone()
    }

    pub fn results(&self) -> ApiPart<TestResult> {
        self.parts.results.clone()
    }

    pub fn files(&self) -> ApiPart<StoredFile> {
        self.parts.files.clone()
    }

    pub fn quotes(&self) -> ApiPart<Quote> {
        self.parts.quotes.clone()
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(SlickError::InvalidBaseUrl("base url is empty".to_string()));
    }

    let parsed = Url::parse(trimmed)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SlickError::InvalidBaseUrl(format!(
            "unsupported scheme '{}' in {trimmed}",
            parsed.scheme()
        )));
    }

    let root = trimmed.trim_end_matches('/');
    if root.ends_with("/api") {
        Ok(root.to_string())
    } else {
        Ok(format!("{root}/api"))
    }
}
