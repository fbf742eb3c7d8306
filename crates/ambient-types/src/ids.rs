//! Type-safe identifier wrappers.
//!
//! Spaces and streams are keyed by small integers that are unique across
//! the whole dataset; sites are keyed by short strings (`"1"`, `"2"`, ...).
//! Wrapping them keeps a space id from being passed where a stream id is
//! expected. All wrappers serialize as their bare inner value, so the JSON
//! wire shape is `{"id": 5}` rather than `{"id": {"0": 5}}`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`u32`] with standard derives.
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw integer identifier.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the inner integer value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_numeric_id! {
    /// Identifier of a [`Space`](crate::Space), unique across all sites.
    SpaceId
}

define_numeric_id! {
    /// Identifier of a [`Stream`](crate::Stream), unique across all sites.
    StreamId
}

/// Identifier of a [`Site`](crate::Site).
///
/// Site ids are opaque strings in the seed document and in the
/// `siteId` query parameter; no numeric interpretation is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SiteId(pub String);

impl SiteId {
    /// Create a site identifier from anything string-like.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SiteId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for SiteId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
