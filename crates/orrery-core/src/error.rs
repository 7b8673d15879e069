//! Error types for player actions.
//!
//! Every rejected action leaves engine state untouched and is reported
//! through [`ActionError`]. Its `Display` text is the message appended to
//! the action log.

use orrery_types::{ShipId, ShipType, Stockpile, SurveyStatus, WorldId};
use orrery_world::WorldError;

use crate::stockpile;

/// Broad category of a rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionErrorKind {
    /// The colony cannot pay the cost.
    InsufficientResources,
    /// A requirement other than cost was not met.
    PreconditionNotMet,
    /// Checked arithmetic failed.
    Internal,
}

/// Errors returned by build, construct, load, and launch actions.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The colony's stockpile does not cover the cost.
    #[error("insufficient resources at {colony}: short {}", stockpile::describe(.missing))]
    InsufficientResources {
        /// The colony that would pay.
        colony: WorldId,
        /// Amount missing per kind.
        missing: Stockpile,
    },

    /// Ships can only be built at a colony with a foundry.
    #[error("{colony} has no foundry")]
    NoFoundry {
        /// The colony without a foundry.
        colony: WorldId,
    },

    /// No colony exists on the given world.
    #[error("no colony on {0}")]
    ColonyNotFound(WorldId),

    /// The world is not in the catalog.
    #[error("unknown world {0}")]
    WorldNotFound(WorldId),

    /// No ship with the given id exists.
    #[error("ship not found: {0}")]
    ShipNotFound(ShipId),

    /// The ship must be docked and idle for this action.
    #[error("{ship} is not docked")]
    ShipNotDocked {
        /// Ship name.
        ship: String,
    },

    /// Only ships with cargo capacity can be loaded.
    #[error("{ship} is a {ship_type} and cannot carry cargo")]
    NoCargoCapacity {
        /// Ship name.
        ship: String,
        /// Its type.
        ship_type: ShipType,
    },

    /// The destination does not satisfy the ship type's launch filter.
    #[error("{ship} cannot launch to {destination} ({status}): {reason}")]
    IneligibleDestination {
        /// Ship name.
        ship: String,
        /// Requested destination.
        destination: WorldId,
        /// Destination's survey status at launch time.
        status: SurveyStatus,
        /// Which rule rejected it.
        reason: &'static str,
    },

    /// Checked arithmetic failed.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A catalog or survey ledger operation failed.
    #[error(transparent)]
    World(#[from] WorldError),
}

impl ActionError {
    /// Categorize the error.
    pub const fn kind(&self) -> ActionErrorKind {
        match self {
            Self::InsufficientResources { .. } => ActionErrorKind::InsufficientResources,
            Self::NoFoundry { .. }
            | Self::ColonyNotFound(_)
            | Self::WorldNotFound(_)
            | Self::ShipNotFound(_)
            | Self::ShipNotDocked { .. }
            | Self::NoCargoCapacity { .. }
            | Self::IneligibleDestination { .. } => ActionErrorKind::PreconditionNotMet,
            Self::ArithmeticOverflow { .. } | Self::World(_) => ActionErrorKind::Internal,
        }
    }
}
