//! Arrival resolution: the explicit pass that applies each voyage's effect.
//!
//! After movement, ships that reached their destination sit in
//! [`Voyage::Arrived`]. [`resolve_arrivals`] visits each of them once,
//! applies the effect for its type, and docks it. Because docking is what
//! clears the pending flag, an effect cannot be applied twice.
//!
//! Effects:
//! - **probe**: survey the world (no-op if already surveyed or settled)
//! - **seeder**: found a starter colony, only if the world is `Surveyed`
//!   right now; otherwise the seeder docks and waits
//! - **hauler**: unload cargo into the local colony; with no colony there
//!   the cargo stays aboard

use orrery_types::{ShipId, ShipType, Stockpile, SurveyStatus, Voyage, WorldId};
use orrery_world::{Catalog, blueprint};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ActionError;
use crate::state::GameState;
use crate::stockpile;

/// What an arrival did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrivalEffect {
    /// A probe surveyed a previously unknown world.
    Surveyed,
    /// A probe reached a world that was already surveyed or settled.
    AlreadySurveyed,
    /// A seeder founded a colony.
    ColonyFounded,
    /// A seeder reached a world that was no longer `Surveyed`.
    SettlementSkipped(SurveyStatus),
    /// A hauler unloaded its cargo.
    Delivered(Stockpile),
    /// A hauler found no colony; cargo stays aboard.
    DeliveryHeld(Stockpile),
    /// The ship simply docked.
    Docked,
}

/// One resolved arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalReport {
    /// The ship.
    pub ship: ShipId,
    /// Its type.
    pub ship_type: ShipType,
    /// Where it arrived.
    pub world: WorldId,
    /// The effect applied.
    pub effect: ArrivalEffect,
    /// Log message recorded for the arrival.
    pub message: String,
}

/// Resolve every pending arrival in the fleet.
///
/// # Errors
///
/// Returns [`ActionError::ArithmeticOverflow`] if a delivery overflows a
/// stockpile; ships resolved before the failure stay resolved.
pub fn resolve_arrivals(
    catalog: &Catalog,
    state: &mut GameState,
) -> Result<Vec<ArrivalReport>, ActionError> {
    let pending = state.fleet.pending_arrivals();
    let mut reports = Vec::with_capacity(pending.len());
    for ship_id in pending {
        if let Some(report) = resolve_one(catalog, state, ship_id)? {
            state.record(report.message.clone());
            reports.push(report);
        }
    }
    Ok(reports)
}

/// Resolve a single ship. Returns `None` if it has no pending arrival.
fn resolve_one(
    catalog: &Catalog,
    state: &mut GameState,
    ship_id: ShipId,
) -> Result<Option<ArrivalReport>, ActionError> {
    let Some(ship) = state.fleet.get(&ship_id) else {
        return Ok(None);
    };
    if !ship.arrival_pending() {
        return Ok(None);
    }
    let ship_type = ship.ship_type;
    let ship_name = ship.name.clone();
    let world_id = ship.location.clone();
    let cargo = ship.cargo.clone();
    let world_name = catalog
        .get(&world_id)
        .map_or_else(|| world_id.to_string(), |w| w.name.clone());

    let (effect, message, keep_cargo) = match ship_type {
        ShipType::Probe => {
            if state.ledger.mark_surveyed(&world_id) {
                let found = catalog.get(&world_id).map_or_else(String::new, |w| {
                    w.resources
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                });
                let found = if found.is_empty() { "no resources".to_owned() } else { found };
                info!(ship = %ship_name, world = %world_id, "World surveyed");
                (
                    ArrivalEffect::Surveyed,
                    format!("{ship_name} surveyed {world_name}: {found}"),
                    true,
                )
            } else {
                (
                    ArrivalEffect::AlreadySurveyed,
                    format!("{ship_name} reached {world_name}; already charted"),
                    true,
                )
            }
        }
        ShipType::Seeder => {
            let status = state.ledger.status(&world_id);
            match catalog.get(&world_id) {
                Some(world)
                    if status == SurveyStatus::Surveyed && !state.colonies.contains(&world_id) =>
                {
                    let colony = blueprint::starter_colony(world);
                    let colony_name = colony.name.clone();
                    state.ledger.mark_colonized(&world_id)?;
                    state.colonies.insert(colony);
                    info!(ship = %ship_name, world = %world_id, "Colony founded");
                    (
                        ArrivalEffect::ColonyFounded,
                        format!("{ship_name} founded {colony_name}"),
                        true,
                    )
                }
                _ => {
                    debug!(ship = %ship_name, world = %world_id, %status, "Settlement skipped");
                    (
                        ArrivalEffect::SettlementSkipped(status),
                        format!("{ship_name} reached {world_name} ({status}); no site to settle"),
                        true,
                    )
                }
            }
        }
        ShipType::Hauler if cargo.is_empty() => (
            ArrivalEffect::Docked,
            format!("{ship_name} docked at {world_name}"),
            true,
        ),
        ShipType::Hauler => match state.colonies.get_mut(&world_id) {
            Some(colony) => {
                stockpile::credit(&mut colony.stockpile, &cargo)?;
                info!(ship = %ship_name, world = %world_id, "Cargo delivered");
                (
                    ArrivalEffect::Delivered(cargo.clone()),
                    format!(
                        "{ship_name} delivered {} to {world_name}",
                        stockpile::describe(&cargo)
                    ),
                    false,
                )
            }
            None => {
                debug!(ship = %ship_name, world = %world_id, "No colony to receive cargo");
                (
                    ArrivalEffect::DeliveryHeld(cargo.clone()),
                    format!("{ship_name} found no colony at {world_name}; cargo held aboard"),
                    true,
                )
            }
        },
    };

    if let Some(ship) = state.fleet.get_mut(&ship_id) {
        if !keep_cargo {
            ship.cargo.clear();
        }
        ship.voyage = Voyage::Docked;
    }

    Ok(Some(ArrivalReport {
        ship: ship_id,
        ship_type,
        world: world_id,
        effect,
        message,
    }))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use orrery_types::{ResourceKind, Ship};
    use rust_decimal_macros::dec;

    use super::*;

    fn setup() -> (Catalog, GameState) {
        let catalog = Catalog::sol().unwrap();
        let state = GameState::new(&catalog, 50).unwrap();
        (catalog, state)
    }

    fn arrived(state: &mut GameState, ship_type: ShipType, at: &str, cargo: Stockpile) -> ShipId {
        let id = ShipId::new();
        state.fleet.insert(Ship {
            id,
            ship_type,
            name: format!("{ship_type}-t"),
            location: WorldId::from(at),
            voyage: Voyage::Arrived,
            cargo,
        });
        id
    }

    #[test]
    fn probe_surveys_unknown_world() {
        let (catalog, mut state) = setup();
        let probe = arrived(&mut state, ShipType::Probe, "mars", Stockpile::new());
        let reports = resolve_arrivals(&catalog, &mut state).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].effect, ArrivalEffect::Surveyed);
        assert_eq!(reports[0].message, "Probe-t surveyed Mars: Fe, Si, Ice");
        assert_eq!(
            state.ledger.status(&WorldId::from("mars")),
            SurveyStatus::Surveyed
        );
        assert!(state.fleet.get(&probe).unwrap().is_idle());
    }

    #[test]
    fn arrival_effect_applies_once() {
        let (catalog, mut state) = setup();
        arrived(&mut state, ShipType::Probe, "mars", Stockpile::new());
        assert_eq!(resolve_arrivals(&catalog, &mut state).unwrap().len(), 1);
        assert!(resolve_arrivals(&catalog, &mut state).unwrap().is_empty());
    }

    #[test]
    fn probe_at_colony_does_not_downgrade() {
        let (catalog, mut state) = setup();
        arrived(&mut state, ShipType::Probe, "earth", Stockpile::new());
        let reports = resolve_arrivals(&catalog, &mut state).unwrap();
        assert_eq!(reports[0].effect, ArrivalEffect::AlreadySurveyed);
        assert_eq!(
            state.ledger.status(&WorldId::from("earth")),
            SurveyStatus::Colony
        );
    }

    #[test]
    fn seeder_founds_colony_on_surveyed_world() {
        let (catalog, mut state) = setup();
        let titan = WorldId::from("titan");
        state.ledger.mark_surveyed(&titan);
        arrived(&mut state, ShipType::Seeder, "titan", Stockpile::new());
        let reports = resolve_arrivals(&catalog, &mut state).unwrap();
        assert_eq!(reports[0].effect, ArrivalEffect::ColonyFounded);
        assert_eq!(state.ledger.status(&titan), SurveyStatus::Colony);
        let colony = state.colonies.get(&titan).unwrap();
        assert_eq!(colony.name, "Titan Colony");
    }

    #[test]
    fn second_seeder_does_not_duplicate_colony() {
        let (catalog, mut state) = setup();
        let titan = WorldId::from("titan");
        state.ledger.mark_surveyed(&titan);
        arrived(&mut state, ShipType::Seeder, "titan", Stockpile::new());
        arrived(&mut state, ShipType::Seeder, "titan", Stockpile::new());
        let reports = resolve_arrivals(&catalog, &mut state).unwrap();
        let founded = reports
            .iter()
            .filter(|r| r.effect == ArrivalEffect::ColonyFounded)
            .count();
        assert_eq!(founded, 1);
        assert!(
            reports
                .iter()
                .any(|r| r.effect == ArrivalEffect::SettlementSkipped(SurveyStatus::Colony))
        );
        assert_eq!(state.colonies.len(), 2);
    }

    #[test]
    fn seeder_at_unknown_world_is_skipped() {
        let (catalog, mut state) = setup();
        arrived(&mut state, ShipType::Seeder, "mars", Stockpile::new());
        let reports = resolve_arrivals(&catalog, &mut state).unwrap();
        assert_eq!(
            reports[0].effect,
            ArrivalEffect::SettlementSkipped(SurveyStatus::Unknown)
        );
        assert!(!state.colonies.contains(&WorldId::from("mars")));
    }

    #[test]
    fn hauler_delivers_and_clears_cargo() {
        let (catalog, mut state) = setup();
        let cargo = Stockpile::from([(ResourceKind::Ice, dec!(30))]);
        let hauler = arrived(&mut state, ShipType::Hauler, "earth", cargo);
        let before = state
            .colonies
            .get(&WorldId::from("earth"))
            .unwrap()
            .quantity(ResourceKind::Ice);
        resolve_arrivals(&catalog, &mut state).unwrap();
        let after = state
            .colonies
            .get(&WorldId::from("earth"))
            .unwrap()
            .quantity(ResourceKind::Ice);
        assert_eq!(after, before + dec!(30));
        assert!(state.fleet.get(&hauler).unwrap().cargo.is_empty());
    }

    #[test]
    fn hauler_without_colony_keeps_cargo() {
        let (catalog, mut state) = setup();
        let cargo = Stockpile::from([(ResourceKind::Fe, dec!(10))]);
        let hauler = arrived(&mut state, ShipType::Hauler, "mars", cargo.clone());
        let reports = resolve_arrivals(&catalog, &mut state).unwrap();
        assert_eq!(reports[0].effect, ArrivalEffect::DeliveryHeld(cargo.clone()));
        let ship = state.fleet.get(&hauler).unwrap();
        assert_eq!(ship.cargo, cargo);
        assert!(ship.is_idle());
    }

    #[test]
    fn arrivals_are_logged() {
        let (catalog, mut state) = setup();
        arrived(&mut state, ShipType::Hauler, "earth", Stockpile::new());
        resolve_arrivals(&catalog, &mut state).unwrap();
        assert_eq!(
            state.log.latest().map(|e| e.message.as_str()),
            Some("Hauler-t docked at Earth")
        );
    }
}
