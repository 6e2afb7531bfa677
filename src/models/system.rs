//! Server-level models: stored files, links, version, updates and quotes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none};

use crate::fields::{EpochMillis, Integer};
use crate::model::impl_model;
use crate::models::LogEntry;

/// A file stored in slick, uploaded in chunks.
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub id: Option<String>,
    pub filename: Option<String>,
    #[serde_as(as = "Option<Integer>")]
    pub chunk_size: Option<i64>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub upload_date: Option<DateTime<Utc>>,
    pub mimetype: Option<String>,
    pub md5: Option<String>,
    #[serde_as(as = "Option<Integer>")]
    pub length: Option<i64>,
}
impl_model!(StoredFile, id, url = "files");

/// A named hyperlink attached to a result or testrun.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub name: Option<String>,
    pub url: Option<String>,
}
impl_model!(Link);

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: Some(url.into()),
        }
    }
}

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadStatus {
    pub system_name: Option<String>,
    #[serde_as(as = "Option<EpochMillis>")]
    pub reload_time: Option<DateTime<Utc>>,
    pub system_status: Option<String>,
}
impl_model!(ReloadStatus);

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Option<String>,
    pub quote: Option<String>,
    pub image_url: Option<String>,
    pub attributed: Option<String>,
}
impl_model!(Quote, id);

/// Version of a product; slick reports its own as product `slick`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVersion {
    pub product_name: Option<String>,
    pub version_string: Option<String>,
}
impl_model!(ProductVersion, url = "version");

/// A pending or applied server-side data update.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlickUpdate {
    pub update_id: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub needs_applying: Option<bool>,
}
impl_model!(SlickUpdate, url = "updates");

/// Log of one applied update.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    pub id: Option<String>,
    pub update_id: Option<String>,
    pub logs: Option<Vec<LogEntry>>,
}
impl_model!(UpdateRecord, id, url = "records");
