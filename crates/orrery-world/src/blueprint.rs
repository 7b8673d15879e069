//! Building and ship blueprints, plus the fixed starter colonies.
//!
//! - [`building`] returns cost and power figures for each [`BuildingKind`]
//! - [`ship`] returns cost, speed and cargo capacity for each [`ShipType`]
//! - [`home_colony`] and [`starter_colony`] define the colonies that exist
//!   at game start and that a seeder founds on arrival

use std::collections::BTreeMap;

use orrery_types::{BuildingKind, Colony, ResourceKind, ShipType, Stockpile, World, WorldId};
use rust_decimal::Decimal;

/// Catalog id of the world the game starts on.
pub const HOME_WORLD: &str = "earth";

/// Static figures for one building kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingBlueprint {
    /// The building kind.
    pub kind: BuildingKind,
    /// Resources debited on construction.
    pub cost: Stockpile,
    /// Power contributed, in kW.
    pub generates_kw: u32,
    /// Power drawn, in kW.
    pub consumes_kw: u32,
}

/// Static figures for one ship type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipBlueprint {
    /// The ship type.
    pub ship_type: ShipType,
    /// Resources debited on construction.
    pub cost: Stockpile,
    /// Orbital-order units covered per `DAYS_PER_ORDER` days.
    pub speed: u32,
    /// Aggregate cargo capacity across all resource kinds.
    pub cargo_capacity: Decimal,
}

fn stock(entries: &[(ResourceKind, u32)]) -> Stockpile {
    entries
        .iter()
        .map(|&(kind, qty)| (kind, Decimal::from(qty)))
        .collect()
}

/// Return the blueprint for a building kind.
pub fn building(kind: BuildingKind) -> BuildingBlueprint {
    use ResourceKind::{Fe, He3, Ice, Si};

    let (cost, generates_kw, consumes_kw) = match kind {
        BuildingKind::Solar => (stock(&[(Fe, 10), (Si, 15)]), 25, 0),
        BuildingKind::Reactor => (stock(&[(Fe, 50), (Si, 30), (He3, 10)]), 100, 0),
        BuildingKind::Drill => (stock(&[(Fe, 12), (Si, 4)]), 0, 10),
        BuildingKind::Refinery => (stock(&[(Fe, 25), (Si, 10)]), 0, 15),
        BuildingKind::Foundry => (stock(&[(Fe, 40), (Si, 20)]), 0, 20),
        BuildingKind::Habitat => (stock(&[(Fe, 20), (Si, 10), (Ice, 10)]), 0, 5),
    };
    BuildingBlueprint {
        kind,
        cost,
        generates_kw,
        consumes_kw,
    }
}

/// Return the blueprint for a ship type.
pub fn ship(ship_type: ShipType) -> ShipBlueprint {
    use ResourceKind::{Fe, Ice, Si};

    let (cost, speed, capacity) = match ship_type {
        ShipType::Probe => (stock(&[(Fe, 10), (Si, 10)]), 10, 0),
        ShipType::Hauler => (stock(&[(Fe, 40), (Si, 10)]), 4, 100),
        ShipType::Seeder => (stock(&[(Fe, 60), (Si, 30), (Ice, 20)]), 6, 0),
    };
    ShipBlueprint {
        ship_type,
        cost,
        speed,
        cargo_capacity: Decimal::from(capacity),
    }
}

/// The colony the player starts with.
pub fn home_colony() -> Colony {
    use ResourceKind::{C, Fe, Ice, Si};

    Colony {
        world: WorldId::from(HOME_WORLD),
        name: "Earth Prime".to_owned(),
        stockpile: stock(&[(Fe, 120), (Si, 80), (Ice, 40), (C, 20)]),
        buildings: BTreeMap::from([
            (BuildingKind::Solar, 2),
            (BuildingKind::Drill, 1),
            (BuildingKind::Foundry, 1),
        ]),
        population: 1000,
    }
}

/// The colony a seeder founds on arrival at a surveyed world.
pub fn starter_colony(world: &World) -> Colony {
    use ResourceKind::{Fe, Si};

    Colony {
        world: world.id.clone(),
        name: format!("{} Colony", world.name),
        stockpile: stock(&[(Fe, 20), (Si, 10)]),
        buildings: BTreeMap::from([
            (BuildingKind::Solar, 1),
            (BuildingKind::Drill, 1),
            (BuildingKind::Habitat, 1),
        ]),
        population: 50,
    }
}
