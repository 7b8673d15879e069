//! Identifier types for catalog worlds and fleet ships.
//!
//! Worlds are catalog-defined and keyed by a short, stable slug (`"earth"`,
//! `"europa"`). Ships are created at runtime and use UUID v7, so iterating a
//! map keyed by [`ShipId`] visits ships in creation order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
        )]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a ship in the fleet registry.
    ShipId
}

/// Catalog slug identifying a celestial body (planet or moon).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldId(pub String);

impl WorldId {
    /// Create a world id from a slug.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Borrow the slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for WorldId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorldId {
    fn from(slug: &str) -> Self {
        Self(slug.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ship_ids_are_unique() {
        assert_ne!(ShipId::new(), ShipId::new());
    }

    #[test]
    fn world_id_displays_slug() {
        let id = WorldId::from("europa");
        assert_eq!(id.to_string(), "europa");
        assert_eq!(id.as_str(), "europa");
    }

    #[test]
    fn world_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&WorldId::new("mars")).unwrap_or_default();
        assert_eq!(json, "\"mars\"");
    }
}
