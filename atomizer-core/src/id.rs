//! Typed ID wrappers for atoms, conductors and electrons.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed ID wrappers keep handler types, producer names and unit ids apart.
/// They are plain strings underneath; the engine only compares them.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new typed ID from anything that converts to String.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

typed_id!(
    AtomId,
    "Handler-type identifier. Electrons name the atom type that must process them."
);
typed_id!(ConductorId, "Identifier of a conductor (a work source).");
typed_id!(ElectronId, "Identifier of a single electron.");
