//! The `system-configuration` endpoint, whose item shape is chosen per call.

use serde::Serialize;

use crate::api::{ApiPart, FindOneMode};
use crate::client::SlickClient;
use crate::error::Result;
use crate::models::{SystemConfiguration, SystemConfigurationKind};
use crate::queries::query_pairs;

const CONFIG_TYPE_KEY: &str = "config-type";

/// Part for slick's system configurations.
///
/// Every verb takes the configuration kind as a type parameter. Finds
/// for a kind with a known `configurationType` add `config-type` to the
/// query unless the caller already set it.
///
/// ```no_run
/// # async fn demo(slick: slickqa::SlickConnection) -> slickqa::Result<()> {
/// use slickqa::models::EmailSubscription;
///
/// let subscriptions = slick
///     .system_configurations()
///     .find_all::<EmailSubscription>()
///     .await?;
/// # let _ = subscriptions;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SystemConfigurationPart {
    inner: ApiPart<SystemConfiguration>,
}

impl SystemConfigurationPart {
    pub(crate) fn new(client: SlickClient, parent_url: impl Into<String>) -> Self {
        Self {
            inner: ApiPart::new(client, parent_url),
        }
    }

    pub fn with<K: SystemConfigurationKind>(mut self, config: &K) -> Self {
        self.inner = self.inner.with(&SystemConfiguration {
            id: config.common().id.clone(),
            ..Default::default()
        });
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.inner = self.inner.with_id(id);
        self
    }

    pub fn url(&mut self) -> String {
        self.inner.url()
    }

    /// A part typed for `K` that takes over any pending data.
    fn typed<K: SystemConfigurationKind>(&mut self) -> ApiPart<K> {
        self.inner.take_as()
    }

    pub async fn find<K, Q>(&mut self, query: &Q) -> Result<Vec<K>>
    where
        K: SystemConfigurationKind,
        Q: Serialize + ?Sized,
    {
        let mut pairs = query_pairs(query)?;
        if let Some(config_type) = K::CONFIGURATION_TYPE {
            if !pairs.iter().any(|(key, _)| key == CONFIG_TYPE_KEY) {
                pairs.push((CONFIG_TYPE_KEY.to_string(), config_type.to_string()));
            }
        }
        self.typed::<K>().find(&pairs).await
    }

    pub async fn find_all<K: SystemConfigurationKind>(&mut self) -> Result<Vec<K>> {
        self.find::<K, _>(&()).await
    }

    pub async fn find_one<K, Q>(&mut self, query: &Q, mode: FindOneMode) -> Result<Option<K>>
    where
        K: SystemConfigurationKind,
        Q: Serialize + ?Sized,
    {
        let found = self.find::<K, Q>(query).await?;
        Ok(match mode {
            FindOneMode::First => found.into_iter().next(),
            FindOneMode::Last => found.into_iter().last(),
        })
    }

    pub async fn get<K: SystemConfigurationKind>(&mut self) -> Result<K> {
        self.typed::<K>().get().await
    }

    pub async fn create<K: SystemConfigurationKind>(&mut self, config: &K) -> Result<K> {
        self.typed::<K>().create(config).await
    }

    pub async fn update<K: SystemConfigurationKind>(&mut self, config: &K) -> Result<K> {
        self.typed::<K>().update(config).await
    }

    pub async fn remove(&mut self) -> Result<()> {
        self.inner.remove().await
    }
}
