//! The [`Model`] trait shared by every slick data type.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// A slick data type that maps to and from a JSON object.
///
/// Fields are `Option`s: a key missing from the incoming JSON leaves the
/// field unset, and unset fields are not serialized. Keys the model does
/// not know about are ignored so newer servers keep working.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Type name, used to derive the default URL segment.
    const NAME: &'static str;

    /// URL segment override for endpoints that don't follow the
    /// lower-cased plural convention.
    const URL_PART: Option<&'static str> = None;

    /// URL segment of the collection holding this model.
    fn url_part() -> String {
        match Self::URL_PART {
            Some(part) => part.to_string(),
            None => format!("{}s", Self::NAME.to_lowercase()),
        }
    }

    /// Server identifier, when the model has one and it is set.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Build an instance from a decoded JSON object.
    fn from_dict(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Build an instance from JSON text.
    fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The set fields as a JSON object.
    fn to_dict(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// The set fields as JSON text.
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Implements [`Model`] for a struct.
///
/// `id` wires [`Model::id`] to an `id: Option<String>` field, and
/// `url = "..."` overrides the URL segment.
macro_rules! impl_model {
    ($ty:ident) => {
        impl $crate::model::Model for $ty {
            const NAME: &'static str = stringify!($ty);
        }
    };
    ($ty:ident, url = $url:literal) => {
        impl $crate::model::Model for $ty {
            const NAME: &'static str = stringify!($ty);
            const URL_PART: Option<&'static str> = Some($url);
        }
    };
    ($ty:ident, id) => {
        impl $crate::model::Model for $ty {
            const NAME: &'static str = stringify!($ty);

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }
        }
    };
    ($ty:ident, id, url = $url:literal) => {
        impl $crate::model::Model for $ty {
            const NAME: &'static str = stringify!($ty);
            const URL_PART: Option<&'static str> = Some($url);

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }
        }
    };
}

pub(crate) use impl_model;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Widget {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    }
    impl_model!(Widget, id);

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct HostStatus {}
    impl_model!(HostStatus, url = "hoststatus");

    #[test]
    fn test_default_url_part_is_lowercase_plural() {
        assert_eq!(Widget::url_part(), "widgets");
    }

    #[test]
    fn test_url_part_override() {
        assert_eq!(HostStatus::url_part(), "hoststatus");
    }

    #[test]
    fn test_id_reflects_field() {
        let mut w = Widget::default();
        assert_eq!(w.id(), None);
        w.id = Some("abc".to_string());
        assert_eq!(w.id(), Some("abc"));
    }

    #[test]
    fn test_from_dict_ignores_unknown_keys() {
        let w = Widget::from_dict(serde_json::json!({"id": "1", "brandNew": true})).unwrap();
        assert_eq!(w.id(), Some("1"));
        assert_eq!(w.to_json().unwrap(), r#"{"id":"1"}"#);
    }
}
