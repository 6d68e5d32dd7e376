//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated time entry identifier.
    ///
    /// Entry IDs must be non-empty strings. Fresh IDs are random UUIDs, so
    /// entries created in the same run (or on different runs) never collide.
    EntryId, "entry ID"
);

impl EntryId {
    /// Generates a fresh random entry ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn entry_id_rejects_empty() {
        assert_eq!(
            EntryId::new(""),
            Err(ValidationError::Empty { field: "entry ID" })
        );
    }

    #[test]
    fn entry_id_accepts_legacy_timestamp_ids() {
        let id = EntryId::new("1717171717171").unwrap();
        assert_eq!(id.as_str(), "1717171717171");
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<EntryId> = (0..1000).map(|_| EntryId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn entry_id_deserialize_rejects_empty() {
        let result: Result<EntryId, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }
}
