//! Entity structs for the Orrery simulation.
//!
//! Covers catalog [`World`]s, per-world [`Colony`] economies, fleet
//! [`Ship`]s with their [`Voyage`] state machine, and the [`LogEntry`]
//! records of the action log. Cross-references are by [`WorldId`] or
//! [`ShipId`] only; nothing here holds a reference to another entity.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BuildingKind, ResourceKind, ShipType};
use crate::ids::{ShipId, WorldId};

/// Resource quantities keyed by kind. Used for colony stockpiles, ship
/// cargo, and blueprint costs alike.
pub type Stockpile = BTreeMap<ResourceKind, Decimal>;

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// A celestial body in the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct World {
    /// Catalog slug.
    pub id: WorldId,
    /// Display name.
    pub name: String,
    /// Orbital rank used for distance estimation. `None` for moons, which
    /// inherit their parent's order.
    pub order: Option<u32>,
    /// The body this world orbits, if it is a moon.
    pub parent: Option<WorldId>,
    /// Resource kinds drills can extract here.
    pub resources: BTreeSet<ResourceKind>,
    /// Gas giants cannot be colonized directly.
    pub gas: bool,
    /// Dead worlds can never be colonized.
    pub dead: bool,
    /// Flavour text.
    pub description: String,
}

impl World {
    /// A world is colonizable iff it is neither a gas giant nor dead.
    pub const fn is_colonizable(&self) -> bool {
        !self.gas && !self.dead
    }

    /// Whether this world is a moon.
    pub const fn is_moon(&self) -> bool {
        self.parent.is_some()
    }
}

// ---------------------------------------------------------------------------
// Colony
// ---------------------------------------------------------------------------

/// Economic state of a settlement on a `colony`-status world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Colony {
    /// The world this colony occupies.
    pub world: WorldId,
    /// Display name.
    pub name: String,
    /// Stored resources. Quantities are never negative.
    #[ts(as = "BTreeMap<ResourceKind, String>")]
    pub stockpile: Stockpile,
    /// Number of each building. Counts only ever increase.
    pub buildings: BTreeMap<BuildingKind, u32>,
    /// Number of residents.
    pub population: u32,
}

impl Colony {
    /// Number of buildings of the given kind (zero if none).
    pub fn building_count(&self, kind: BuildingKind) -> u32 {
        self.buildings.get(&kind).copied().unwrap_or(0)
    }

    /// Quantity of the given resource in stock (zero if none).
    pub fn quantity(&self, kind: ResourceKind) -> Decimal {
        self.stockpile.get(&kind).copied().unwrap_or(Decimal::ZERO)
    }

    /// Whether the colony has at least one foundry.
    pub fn has_foundry(&self) -> bool {
        self.building_count(BuildingKind::Foundry) > 0
    }
}

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

/// Movement state of a ship.
///
/// `Docked -> InTransit -> Arrived -> Docked`. The `Arrived` state is the
/// pending-arrival marker: the arrival pass applies the ship's effect and
/// moves it back to `Docked`, so an effect can be applied at most once per
/// voyage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Voyage {
    /// Idle at `Ship::location`.
    Docked,
    /// Travelling to `to`; `eta` whole days remain.
    InTransit {
        /// Destination world.
        to: WorldId,
        /// Remaining days.
        eta: u32,
    },
    /// Reached `Ship::location` this tick; arrival effect not yet applied.
    Arrived,
}

/// A spacecraft in the fleet registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Ship {
    /// Unique ship identifier.
    pub id: ShipId,
    /// Role of the ship.
    pub ship_type: ShipType,
    /// Display name, e.g. `Probe-1`.
    pub name: String,
    /// Last docked world. While in transit this is the origin.
    pub location: WorldId,
    /// Movement state.
    pub voyage: Voyage,
    /// Loaded cargo. Only haulers ever carry anything.
    #[ts(as = "BTreeMap<ResourceKind, String>")]
    pub cargo: Stockpile,
}

impl Ship {
    /// Whether the ship is docked with no pending arrival.
    pub const fn is_idle(&self) -> bool {
        matches!(self.voyage, Voyage::Docked)
    }

    /// Whether the ship is travelling.
    pub const fn is_moving(&self) -> bool {
        matches!(self.voyage, Voyage::InTransit { .. })
    }

    /// Whether the ship has arrived and still awaits its arrival effect.
    pub const fn arrival_pending(&self) -> bool {
        matches!(self.voyage, Voyage::Arrived)
    }

    /// Destination while in transit.
    pub const fn destination(&self) -> Option<&WorldId> {
        match &self.voyage {
            Voyage::InTransit { to, .. } => Some(to),
            Voyage::Docked | Voyage::Arrived => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Action log
// ---------------------------------------------------------------------------

/// One line of the player-facing action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// Day on which the entry was recorded.
    pub day: u64,
    /// Human-readable message.
    pub message: String,
}
