//! System configurations.
//!
//! Slick stores many differently-shaped records under one
//! `system-configuration` endpoint, told apart by `configurationType`.
//! Each shape is a [`SystemConfigurationKind`]; the caller picks the
//! kind when querying.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none};

use crate::fields::Integer;
use crate::model::Model;
use crate::models::ProjectReference;

/// Fields common to every system configuration.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfiguration {
    pub id: Option<String>,
    pub configuration_type: Option<String>,
    pub name: Option<String>,
    pub class_name: Option<String>,
}

/// A concrete system configuration shape.
pub trait SystemConfigurationKind: Model + Default {
    /// Value of `configurationType` for this kind; `None` matches any.
    const CONFIGURATION_TYPE: Option<&'static str>;

    /// Server-side class backing this kind.
    const CLASS_NAME: Option<&'static str> = None;

    fn common(&self) -> &SystemConfiguration;

    fn common_mut(&mut self) -> &mut SystemConfiguration;

    /// An empty configuration with its type and class name filled in.
    fn new_configuration() -> Self {
        let mut config = Self::default();
        let common = config.common_mut();
        common.configuration_type = Self::CONFIGURATION_TYPE.map(str::to_string);
        common.class_name = Self::CLASS_NAME.map(str::to_string);
        config
    }
}

impl Model for SystemConfiguration {
    const NAME: &'static str = "SystemConfiguration";
    const URL_PART: Option<&'static str> = Some("system-configuration");

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl SystemConfigurationKind for SystemConfiguration {
    const CONFIGURATION_TYPE: Option<&'static str> = None;

    fn common(&self) -> &SystemConfiguration {
        self
    }

    fn common_mut(&mut self) -> &mut SystemConfiguration {
        self
    }
}

macro_rules! system_configuration_kind {
    ($ty:ident, $config_type:literal) => {
        system_configuration_kind!($ty, $config_type, None);
    };
    ($ty:ident, $config_type:literal, $class:expr) => {
        impl Model for $ty {
            const NAME: &'static str = stringify!($ty);
            const URL_PART: Option<&'static str> = Some("system-configuration");

            fn id(&self) -> Option<&str> {
                self.common.id.as_deref()
            }
        }

        impl SystemConfigurationKind for $ty {
            const CONFIGURATION_TYPE: Option<&'static str> = Some($config_type);
            const CLASS_NAME: Option<&'static str> = $class;

            fn common(&self) -> &SystemConfiguration {
                &self.common
            }

            fn common_mut(&mut self) -> &mut SystemConfiguration {
                &mut self.common
            }
        }
    };
}

/// Connection settings for the AMQP event exchange.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmqpSystemConfiguration {
    #[serde(flatten)]
    pub common: SystemConfiguration,
    pub exchange_name: Option<String>,
    pub hostname: Option<String>,
    #[serde_as(as = "Option<Integer>")]
    pub port: Option<i64>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub virtual_host: Option<String>,
}
system_configuration_kind!(
    AmqpSystemConfiguration,
    "amqp-system-configuration",
    Some("org.tcrun.slickij.api.data.AMQPSystemConfiguration")
);

/// Email template; global when `project` is unset.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateConfiguration {
    #[serde(flatten)]
    pub common: SystemConfiguration,
    pub project: Option<ProjectReference>,
    pub subject_template: Option<String>,
    pub email_template: Option<String>,
}
system_configuration_kind!(
    EmailTemplateConfiguration,
    "email-template-configuration",
    Some("org.tcrun.slickij.api.data.EmailTemplateConfiguration")
);

/// Global SMTP settings and sender address.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSystemConfiguration {
    #[serde(flatten)]
    pub common: SystemConfiguration,
    pub smtp_hostname: Option<String>,
    #[serde_as(as = "Option<Integer>")]
    pub smtp_port: Option<i64>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub ssl: Option<bool>,
    pub enabled: Option<bool>,
    pub sender: Option<String>,
}
system_configuration_kind!(
    EmailSystemConfiguration,
    "email-system-configuration",
    Some("org.tcrun.slickij.api.data.EmailSystemConfiguration")
);

/// Turns off emails for one kind of object.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailOffSwitch {
    #[serde(flatten)]
    pub common: SystemConfiguration,
    pub turn_off_emails_for_type: Option<String>,
    pub turn_off_emails_for_id: Option<String>,
}
system_configuration_kind!(
    EmailOffSwitch,
    "email-off-switch",
    Some("org.tcrun.slickij.api.data.EmailOffSwitch")
);

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInfo {
    pub subscription_type: Option<String>,
    pub subscription_value: Option<String>,
    pub on_start: Option<bool>,
}
crate::model::impl_model!(SubscriptionInfo);

/// Email subscription; the email address is stored as the name.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSubscription {
    #[serde(flatten)]
    pub common: SystemConfiguration,
    pub enabled: Option<bool>,
    pub subscriptions: Option<Vec<SubscriptionInfo>>,
}
system_configuration_kind!(
    EmailSubscription,
    "email-subscription",
    Some("org.tcrun.slickij.api.data.EmailSubscription")
);

/// How a [`MatchCriteria`] compares a testrun property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonType {
    EqualsIgnoreCase,
    Equals,
    Contains,
    #[serde(untagged)]
    Other(String),
}

/// One match rule of an [`AutomaticTestrunGroup`].
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCriteria {
    pub property_name: Option<String>,
    pub property_value: Option<String>,
    pub comparison_type: Option<ComparisonType>,
}
crate::model::impl_model!(MatchCriteria);

/// Adds matching testruns to a testrun group automatically.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomaticTestrunGroup {
    #[serde(flatten)]
    pub common: SystemConfiguration,
    pub enabled: Option<bool>,
    pub template: Option<String>,
    pub group_type: Option<crate::models::GroupType>,
    pub replace_same_build: Option<bool>,
    pub matchers: Option<Vec<MatchCriteria>>,
}
system_configuration_kind!(AutomaticTestrunGroup, "auto-add-to-testrungroup");

impl AutomaticTestrunGroup {
    /// A new group rule; replaces runs of the same build by default.
    pub fn new() -> Self {
        let mut group = Self::new_configuration();
        group.replace_same_build = Some(true);
        group
    }
}
