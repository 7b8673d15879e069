//! The fleet registry: every ship, docked or in transit.
//!
//! Ships are never removed. Iteration is in [`ShipId`] order, which for
//! UUID v7 ids is creation order.

use std::collections::BTreeMap;

use orrery_types::{Ship, ShipId, ShipType, WorldId};
use serde::{Deserialize, Serialize};

/// All ships keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FleetRegistry {
    ships: BTreeMap<ShipId, Ship>,
}

impl FleetRegistry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self {
            ships: BTreeMap::new(),
        }
    }

    /// Look up a ship.
    pub fn get(&self, id: &ShipId) -> Option<&Ship> {
        self.ships.get(id)
    }

    /// Mutable lookup, for engine operations only.
    pub(crate) fn get_mut(&mut self, id: &ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id)
    }

    /// Register a new ship.
    pub(crate) fn insert(&mut self, ship: Ship) {
        self.ships.insert(ship.id, ship);
    }

    /// Iterate ships in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.values()
    }

    /// Mutable iteration, for the movement phase.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ship> {
        self.ships.values_mut()
    }

    /// Ships that have arrived and still await their arrival effect.
    pub fn pending_arrivals(&self) -> Vec<ShipId> {
        self.ships
            .values()
            .filter(|ship| ship.arrival_pending())
            .map(|ship| ship.id)
            .collect()
    }

    /// Idle ships docked at a world.
    pub fn docked_at<'a>(&'a self, world: &'a WorldId) -> impl Iterator<Item = &'a Ship> {
        self.ships
            .values()
            .filter(move |ship| ship.is_idle() && ship.location == *world)
    }

    /// Ships of a given type.
    pub fn of_type(&self, ship_type: ShipType) -> impl Iterator<Item = &Ship> {
        self.ships
            .values()
            .filter(move |ship| ship.ship_type == ship_type)
    }

    /// Number of ships currently in transit.
    pub fn in_transit(&self) -> usize {
        self.ships.values().filter(|ship| ship.is_moving()).count()
    }

    /// Number of ships.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Whether the fleet is empty.
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use orrery_types::{Stockpile, Voyage};

    use super::*;

    fn ship(ship_type: ShipType, at: &str, voyage: Voyage) -> Ship {
        Ship {
            id: ShipId::new(),
            ship_type,
            name: format!("{ship_type}-x"),
            location: WorldId::from(at),
            voyage,
            cargo: Stockpile::new(),
        }
    }

    #[test]
    fn pending_arrivals_only_lists_arrived_ships() {
        let mut fleet = FleetRegistry::new();
        let arrived = ship(ShipType::Probe, "mars", Voyage::Arrived);
        let arrived_id = arrived.id;
        fleet.insert(arrived);
        fleet.insert(ship(ShipType::Hauler, "earth", Voyage::Docked));
        fleet.insert(ship(
            ShipType::Seeder,
            "earth",
            Voyage::InTransit {
                to: WorldId::from("luna"),
                eta: 2,
            },
        ));
        assert_eq!(fleet.pending_arrivals(), vec![arrived_id]);
        assert_eq!(fleet.in_transit(), 1);
    }

    #[test]
    fn docked_at_filters_by_world_and_idleness() {
        let mut fleet = FleetRegistry::new();
        fleet.insert(ship(ShipType::Probe, "earth", Voyage::Docked));
        fleet.insert(ship(ShipType::Probe, "earth", Voyage::Arrived));
        fleet.insert(ship(ShipType::Probe, "mars", Voyage::Docked));
        let earth = WorldId::from("earth");
        assert_eq!(fleet.docked_at(&earth).count(), 1);
        assert_eq!(fleet.of_type(ShipType::Probe).count(), 3);
    }
}
