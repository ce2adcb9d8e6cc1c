use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Indicates that a string could not be parsed as a `major.minor` version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid API version '{input}', expected 'major.minor'")]
pub struct InvalidApiVersion {
    pub input: String,
}

/// A `major.minor` RPC API revision.
///
/// Each message carries the minimum revision the server must implement to handle it.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiVersion {
    major: u32,
    minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub const fn major(&self) -> u32 {
        self.major
    }

    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Whether a server implementing `server` can handle a message stamped with `self`.
    ///
    /// Minor revisions are backwards compatible within the same major version.
    pub fn is_compatible_with(&self, server: ApiVersion) -> bool {
        self.major == server.major && self.minor <= server.minor
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = InvalidApiVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidApiVersion {
            input: s.to_string(),
        };

        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;
        let number = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };

        let major = number(major)?;
        let minor = number(minor)?;

        Ok(Self::new(major, minor))
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let version: ApiVersion = "1.6".parse().unwrap();
        assert_eq!(version, ApiVersion::new(1, 6));
        assert_eq!(version.to_string(), "1.6");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "1", "1.", ".2", "a.b", "1.2.3", "-1.0", " 1.0", "+1.0", "1.+2"] {
            let result = input.parse::<ApiVersion>();
            assert!(result.is_err(), "'{input}' should not parse");
        }
    }

    #[test]
    fn test_ordering_follows_minor() {
        assert!(ApiVersion::new(1, 2) < ApiVersion::new(1, 10));
        assert!(ApiVersion::new(1, 9) < ApiVersion::new(2, 0));
    }

    #[test]
    fn test_compatibility() {
        let server = ApiVersion::new(1, 4);

        assert!(ApiVersion::new(1, 0).is_compatible_with(server));
        assert!(ApiVersion::new(1, 4).is_compatible_with(server));
        assert!(!ApiVersion::new(1, 5).is_compatible_with(server));
        assert!(!ApiVersion::new(2, 0).is_compatible_with(server));
        assert!(!ApiVersion::new(0, 1).is_compatible_with(server));
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_value(ApiVersion::new(1, 3)).unwrap();
        assert_eq!(json, serde_json::json!("1.3"));

        let back: ApiVersion = serde_json::from_value(json).unwrap();
        assert_eq!(back, ApiVersion::new(1, 3));

        assert!(serde_json::from_value::<ApiVersion>(serde_json::json!("one")).is_err());
    }
}
