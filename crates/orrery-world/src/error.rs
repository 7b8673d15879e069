//! Error types for the `orrery-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use orrery_types::{SurveyStatus, WorldId};

/// Errors that can occur during catalog and survey operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A world id is not in the catalog.
    #[error("world not found: {0}")]
    WorldNotFound(WorldId),

    /// The same world id appeared twice while building a catalog.
    #[error("duplicate world id: {0}")]
    DuplicateWorld(WorldId),

    /// A top-level world has no orbital order.
    #[error("world {0} has neither an orbital order nor a parent")]
    MissingOrder(WorldId),

    /// A moon declares its own orbital order.
    #[error("moon {0} must not declare its own orbital order")]
    MoonWithOrder(WorldId),

    /// A moon names a parent that is missing or is itself a moon.
    #[error("moon {world} has invalid parent {parent}")]
    InvalidParent {
        /// The moon.
        world: WorldId,
        /// The declared parent.
        parent: WorldId,
    },

    /// A colony can only be founded on a surveyed world.
    #[error("world {world} cannot be colonized from status {status}")]
    NotSurveyed {
        /// The world.
        world: WorldId,
        /// Its current status.
        status: SurveyStatus,
    },

    /// Ship speed must be positive for travel-time estimation.
    #[error("ship speed must be positive")]
    ZeroSpeed,

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}
