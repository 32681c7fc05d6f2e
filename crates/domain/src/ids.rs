use std::fmt;

use serde::{Deserialize, Serialize};

/// String keys are authored alongside the world definition (e.g. `"parent"`,
/// `"councilor_scooter"`, `"scooter"`) and round-trip verbatim through the
/// state store, so they wrap `String` rather than a generated UUID.
macro_rules! define_key {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key!(ActorId);
define_key!(IssueKey);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_serialize_as_plain_strings() {
        let id = ActorId::new("parent");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"parent\"");

        let key: IssueKey = serde_json::from_str("\"scooter\"").unwrap();
        assert_eq!(key.as_str(), "scooter");
    }
}
