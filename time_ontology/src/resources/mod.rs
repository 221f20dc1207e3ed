//! Resource definitions for the time ontology.

mod instant;
mod interval;

pub use instant::*;
pub use interval::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix used for anonymous (blank node) resources.
pub const BLANK_NODE_PREFIX: &str = "bnode:";

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Create a fresh anonymous resource identifier.
            pub fn new() -> Self {
                Self(format!("{}{}", BLANK_NODE_PREFIX, Uuid::new_v4()))
            }

            /// Create an identifier for a named resource (e.g. `ex:timeIntvA`).
            pub fn named(iri: impl Into<String>) -> Self {
                Self(iri.into())
            }

            /// The null/unset identifier.
            pub fn nil() -> Self {
                Self(String::new())
            }

            /// Whether this is the null/unset identifier.
            pub fn is_nil(&self) -> bool {
                self.0.is_empty()
            }

            /// Whether this identifier names an anonymous resource.
            pub fn is_blank(&self) -> bool {
                self.0.starts_with(BLANK_NODE_PREFIX)
            }

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
                write!(f, "{}", self.0)
            }
        }
    };
}

resource_id!(
    /// Unique identifier for time instants.
    InstantId
);

resource_id!(
    /// Unique identifier for time intervals.
    IntervalId
);

resource_id!(
    /// Unique identifier for features (the things that have temporal extent).
    FeatureId
);
