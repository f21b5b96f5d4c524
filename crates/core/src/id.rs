//! Unique identifiers for goalboard entities.
//!
//! Ids are opaque strings: records fetched from elsewhere keep whatever id
//! they were given, while locally created records get a fresh ULID.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new id.
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Borrow the raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a Goal
    GoalId
);

define_id!(
    /// Identifier of the user owning a goal
    UserId
);

define_id!(
    /// Unique identifier for a Task
    TaskId
);

define_id!(
    /// Unique identifier for a SkillModule
    ModuleId
);

define_id!(
    /// Unique identifier for a CompletionRecord
    RecordId
);
