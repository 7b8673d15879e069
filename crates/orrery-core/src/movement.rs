//! Launch eligibility, launching, and per-day travel.
//!
//! A ship moves through `Docked -> InTransit -> Arrived -> Docked`.
//! [`launch`] performs the first transition, [`advance_ships`] the second,
//! and the arrival pass in [`crate::arrival`] the third.
//!
//! Destination filters by ship type:
//! - probes may visit any colonizable world,
//! - seeders only `Surveyed` worlds,
//! - haulers only `Colony` worlds.
//!
//! No ship may launch to the world it is docked at.

use orrery_types::{Ship, ShipId, ShipType, SurveyStatus, Voyage, WorldId};
use orrery_world::{Catalog, SurveyLedger, blueprint};
use tracing::debug;

use crate::action::ActionOutcome;
use crate::error::ActionError;
use crate::fleet::FleetRegistry;
use crate::state::GameState;

/// Check a destination against the ship type's launch filter.
///
/// # Errors
///
/// Returns [`ActionError::WorldNotFound`] for ids outside the catalog or
/// [`ActionError::IneligibleDestination`] naming the violated rule.
pub fn check_destination(
    catalog: &Catalog,
    ledger: &SurveyLedger,
    ship: &Ship,
    destination: &WorldId,
) -> Result<(), ActionError> {
    let world = catalog
        .get(destination)
        .ok_or_else(|| ActionError::WorldNotFound(destination.clone()))?;
    let status = ledger.status(destination);

    let rejection = if *destination == ship.location {
        Some("already there")
    } else {
        match ship.ship_type {
            ShipType::Probe => {
                (!world.is_colonizable()).then_some("probes only visit colonizable worlds")
            }
            ShipType::Seeder => {
                (status != SurveyStatus::Surveyed).then_some("seeders need a surveyed world")
            }
            ShipType::Hauler => {
                (status != SurveyStatus::Colony).then_some("haulers only fly between colonies")
            }
        }
    };

    match rejection {
        None => Ok(()),
        Some(reason) => Err(ActionError::IneligibleDestination {
            ship: ship.name.clone(),
            destination: destination.clone(),
            status,
            reason,
        }),
    }
}

/// Every world the ship could currently launch to, in id order.
pub fn eligible_destinations(
    catalog: &Catalog,
    ledger: &SurveyLedger,
    ship: &Ship,
) -> Vec<WorldId> {
    catalog
        .ids()
        .filter(|id| check_destination(catalog, ledger, ship, id).is_ok())
        .cloned()
        .collect()
}

/// Launch a docked, idle ship.
///
/// ETA is `max(2, ceil(|to - from| * 3 / speed))` with moons resolved to
/// their parent's order.
///
/// # Errors
///
/// Returns [`ActionError::ShipNotFound`], [`ActionError::ShipNotDocked`],
/// or a destination error from [`check_destination`]. State is unchanged
/// on error.
pub fn launch(
    catalog: &Catalog,
    state: &mut GameState,
    ship_id: ShipId,
    destination: &WorldId,
) -> Result<ActionOutcome, ActionError> {
    let ship = state
        .fleet
        .get(&ship_id)
        .ok_or(ActionError::ShipNotFound(ship_id))?;
    if !ship.is_idle() {
        return Err(ActionError::ShipNotDocked {
            ship: ship.name.clone(),
        });
    }
    check_destination(catalog, &state.ledger, ship, destination)?;

    let speed = blueprint::ship(ship.ship_type).speed;
    let eta = catalog.travel_days(&ship.location, destination, speed)?;

    let to_name = catalog
        .get(destination)
        .map_or_else(|| destination.to_string(), |w| w.name.clone());

    let ship = state
        .fleet
        .get_mut(&ship_id)
        .ok_or(ActionError::ShipNotFound(ship_id))?;
    ship.voyage = Voyage::InTransit {
        to: destination.clone(),
        eta,
    };
    debug!(ship = %ship.name, from = %ship.location, to = %destination, eta, "Ship launched");

    Ok(ActionOutcome::for_ship(
        ship_id,
        format!("{} launched for {to_name}, ETA {eta} days", ship.name),
    ))
}

/// Advance every in-transit ship by one day.
///
/// A ship with more than one day left counts down. A ship on its last day
/// arrives unconditionally: it docks at the destination and is flagged as
/// a pending arrival, whatever has happened there since launch. Returns
/// the ids of ships that arrived.
pub fn advance_ships(fleet: &mut FleetRegistry) -> Vec<ShipId> {
    let mut arrived = Vec::new();
    for ship in fleet.iter_mut() {
        let Voyage::InTransit { to, eta } = &mut ship.voyage else {
            continue;
        };
        if *eta > 1 {
            *eta = eta.saturating_sub(1);
            continue;
        }
        ship.location = to.clone();
        ship.voyage = Voyage::Arrived;
        arrived.push(ship.id);
    }
    arrived
}
