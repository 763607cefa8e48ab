//! Newtype IDs for catalog identifiers.
//!
//! Identifiers are assigned by the storefront backend; this crate only carries
//! them around, so there is no generator.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire forms an identifier may arrive in. Some backends use numeric keys.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl IdRepr {
    fn into_string(self) -> String {
        match self {
            IdRepr::Text(text) => text,
            IdRepr::Unsigned(n) => n.to_string(),
            IdRepr::Signed(n) => n.to_string(),
        }
    }
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A backend-assigned identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the backend left the identifier blank.
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                IdRepr::deserialize(deserializer).map(|repr| Self(repr.into_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CollectionId);
