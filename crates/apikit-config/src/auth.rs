use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Auth scheme recorded in service metadata
///
/// This is stored metadata only, never enforced: the introspection route
/// exposes the type tag so callers can discover how to authenticate, and
/// the `data` payload stays server-side.
///
/// Serialized as `{"type": "none"|"basic"|"bitly-proxy", "data": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum Auth {
    /// No authentication
    #[default]
    None,
    /// HTTP basic auth; `data` holds the scheme-specific details
    Basic(serde_json::Value),
    /// Bitly OAuth2 proxy; `data` holds the scheme-specific details
    BitlyProxy(serde_json::Value),
}

impl Auth {
    /// Parse the loose string forms accepted for convenience
    ///
    /// Absent, empty, and `"none"` all mean [`Auth::None`]. Variants that
    /// carry data have no string form and must be constructed directly or
    /// deserialized.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedAuth`] for any other string
    pub fn from_loose(value: Option<&str>) -> Result<Self, ConfigError> {
        match value {
            None | Some("" | "none") => Ok(Self::None),
            Some(other) => Err(ConfigError::UnsupportedAuth(other.to_owned())),
        }
    }

    /// The type tag exposed by the metadata route
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic(_) => "basic",
            Self::BitlyProxy(_) => "bitly-proxy",
        }
    }
}

impl FromStr for Auth {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_loose(Some(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_none_forms() {
        assert_eq!(Auth::from_loose(None).unwrap(), Auth::None);
        assert_eq!(Auth::from_loose(Some("")).unwrap(), Auth::None);
        assert_eq!(Auth::from_loose(Some("none")).unwrap(), Auth::None);
    }

    #[test]
    fn loose_rejects_other_strings() {
        let err = Auth::from_loose(Some("basic")).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedAuth("basic".to_owned()));

        assert!("kerberos".parse::<Auth>().is_err());
    }

    #[test]
    fn type_tags() {
        assert_eq!(Auth::None.type_tag(), "none");
        assert_eq!(Auth::Basic(serde_json::json!({})).type_tag(), "basic");
        assert_eq!(
            Auth::BitlyProxy(serde_json::json!({})).type_tag(),
            "bitly-proxy"
        );
    }

    #[test]
    fn tagged_wire_form() {
        let auth = Auth::Basic(serde_json::json!({"username": "svc"}));
        let value = serde_json::to_value(&auth).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "basic", "data": {"username": "svc"}})
        );

        let parsed: Auth =
            serde_json::from_value(serde_json::json!({"type": "bitly-proxy", "data": {}}))
                .unwrap();
        assert_eq!(parsed.type_tag(), "bitly-proxy");

        let none: Auth = serde_json::from_value(serde_json::json!({"type": "none"})).unwrap();
        assert_eq!(none, Auth::None);
    }
}
