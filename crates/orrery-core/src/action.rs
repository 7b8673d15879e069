//! Player actions and their successful outcomes.

use orrery_types::{BuildingKind, ShipId, ShipType, Stockpile, WorldId};
use serde::{Deserialize, Serialize};

/// A player command. Each variant maps to one synchronous engine entry
/// point; see [`Engine::perform`](crate::engine::Engine::perform).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Build one structure at a colony.
    Build {
        /// What to build.
        kind: BuildingKind,
        /// Where to build it.
        colony: WorldId,
    },
    /// Construct a ship at a colony with a foundry.
    ConstructShip {
        /// What to construct.
        ship_type: ShipType,
        /// Where to construct it.
        colony: WorldId,
    },
    /// Replace a docked hauler's cargo from the local stockpile.
    LoadCargo {
        /// The hauler.
        ship: ShipId,
        /// Requested quantities, clamped to stock and capacity.
        manifest: Stockpile,
    },
    /// Send a docked ship to another world.
    Launch {
        /// The ship.
        ship: ShipId,
        /// Its destination.
        destination: WorldId,
    },
}

/// Result of an accepted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Log message describing what happened.
    pub message: String,
    /// The ship created or affected, if any.
    pub ship: Option<ShipId>,
}

impl ActionOutcome {
    /// An outcome that touched no ship.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ship: None,
        }
    }

    /// An outcome concerning a ship.
    pub fn for_ship(ship: ShipId, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ship: Some(ship),
        }
    }
}
