//! Identifier types used throughout the explorer.
//!
//! Identifiers are opaque strings issued by the data layer (object ids,
//! slugs). They are compared by value only and never interpreted.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::Error;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier without validation.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parses an identifier, rejecting blank input.
            pub fn parse(s: &str) -> crate::Result<Self> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(Error::InvalidId(s.to_string()));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a datasource record.
    DatasourceId
);

string_id!(
    /// Identifier of a plugin (the connector type a datasource is built on).
    PluginId
);

string_id!(
    /// Identifier of the container that owns explorer state, usually an application.
    ContainerId
);

string_id!(
    /// Identifier of a page inside a container.
    PageId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id = DatasourceId::parse("  ds-1 ").unwrap();
        assert_eq!(id.as_str(), "ds-1");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(PluginId::parse("").is_err());
        assert!(PluginId::parse("   ").is_err());
    }

    #[test]
    fn display_is_raw_string() {
        assert_eq!(ContainerId::new("app-7").to_string(), "app-7");
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&PageId::new("page-1")).unwrap();
        assert_eq!(json, "\"page-1\"");
    }
}
