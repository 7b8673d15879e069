//! Next-step suggestions for the player.
//!
//! [`suggest`] reads the state and proposes at most one [`Action`]. It
//! never mutates anything; the autopilot in the binary simply performs
//! whatever it returns.

use orrery_types::{BuildingKind, Colony, Ship, ShipType, Stockpile, SurveyStatus, WorldId};
use orrery_world::{Catalog, blueprint};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::movement;
use crate::production;
use crate::state::GameState;
use crate::stockpile;

/// A suggested next move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// The action to take, if one is available right now.
    pub action: Option<Action>,
    /// Human-readable explanation.
    pub message: String,
}

impl Hint {
    fn act(action: Action, message: impl Into<String>) -> Self {
        Self {
            action: Some(action),
            message: message.into(),
        }
    }

    fn wait(message: impl Into<String>) -> Self {
        Self {
            action: None,
            message: message.into(),
        }
    }
}

/// Suggest the next move, in priority order:
///
/// 1. fix a power deficit with solar
/// 2. build a first probe
/// 3. send an idle probe to the nearest unknown world
/// 4. build a seeder once something is surveyed
/// 5. send an idle seeder to the nearest surveyed world
/// 6. build a refinery
/// 7. build another drill
///
/// Steps 6 and 7 fall back to solar when the building would cause a
/// deficit. With nothing to do, the hint says to wait.
pub fn suggest(catalog: &Catalog, state: &GameState) -> Hint {
    fix_deficit(state)
        .or_else(|| construct_first(state, ShipType::Probe, true))
        .or_else(|| dispatch(catalog, state, ShipType::Probe, SurveyStatus::Unknown))
        .or_else(|| {
            let surveyed = state.ledger.count(SurveyStatus::Surveyed) > 0;
            construct_first(state, ShipType::Seeder, surveyed)
        })
        .or_else(|| dispatch(catalog, state, ShipType::Seeder, SurveyStatus::Surveyed))
        .or_else(|| expand(state, BuildingKind::Refinery, true))
        .or_else(|| expand(state, BuildingKind::Drill, false))
        .unwrap_or_else(|| Hint::wait("Accumulate resources"))
}

fn affords(colony: &Colony, cost: &Stockpile) -> bool {
    stockpile::covers(&colony.stockpile, cost)
}

fn build_solar(colony: &Colony, reason: &str) -> Hint {
    Hint::act(
        Action::Build {
            kind: BuildingKind::Solar,
            colony: colony.world.clone(),
        },
        format!("{reason}: build a {} at {}", BuildingKind::Solar, colony.name),
    )
}

fn fix_deficit(state: &GameState) -> Option<Hint> {
    let colony = state
        .colonies
        .iter()
        .find(|c| !production::power_report(c).is_powered())?;
    let short = production::power_report(colony).surplus_kw().unsigned_abs();
    let reason = format!("{} is {short} kW short", colony.name);
    let solar = blueprint::building(BuildingKind::Solar);
    Some(if affords(colony, &solar.cost) {
        build_solar(colony, &reason)
    } else {
        Hint::wait(format!("{reason}; waiting to afford a {}", BuildingKind::Solar))
    })
}

/// Suggest constructing the first ship of a type, if none exists yet and
/// `wanted` holds.
fn construct_first(state: &GameState, ship_type: ShipType, wanted: bool) -> Option<Hint> {
    if !wanted || state.fleet.of_type(ship_type).next().is_some() {
        return None;
    }
    let cost = blueprint::ship(ship_type).cost;
    let colony = state
        .colonies
        .iter()
        .find(|c| c.has_foundry() && affords(c, &cost))?;
    Some(Hint::act(
        Action::ConstructShip {
            ship_type,
            colony: colony.world.clone(),
        },
        format!("Construct a {ship_type} at {}", colony.name),
    ))
}

/// Send the first idle ship of a type to the nearest eligible world with
/// the given status.
fn dispatch(
    catalog: &Catalog,
    state: &GameState,
    ship_type: ShipType,
    target: SurveyStatus,
) -> Option<Hint> {
    state
        .fleet
        .of_type(ship_type)
        .filter(|ship| ship.is_idle())
        .find_map(|ship| {
            let destination = nearest(catalog, state, ship, target)?;
            let name = catalog
                .get(&destination)
                .map_or_else(|| destination.to_string(), |w| w.name.clone());
            let verb = match ship_type {
                ShipType::Probe => "survey",
                ShipType::Seeder => "settle",
                ShipType::Hauler => "supply",
            };
            Some(Hint::act(
                Action::Launch {
                    ship: ship.id,
                    destination,
                },
                format!("Launch {} to {verb} {name}", ship.name),
            ))
        })
}

/// Closest eligible destination with `target` status, by orbital order,
/// ties broken by world id.
fn nearest(
    catalog: &Catalog,
    state: &GameState,
    ship: &Ship,
    target: SurveyStatus,
) -> Option<WorldId> {
    let here = catalog.effective_order(&ship.location).ok()?;
    movement::eligible_destinations(catalog, &state.ledger, ship)
        .into_iter()
        .filter(|id| state.ledger.status(id) == target)
        .filter_map(|id| {
            let order = catalog.effective_order(&id).ok()?;
            Some((order.abs_diff(here), id))
        })
        .min()
        .map(|(_, id)| id)
}

/// Suggest building `kind` at the first colony that can afford it. With
/// `only_first`, colonies already owning one are skipped.
fn expand(state: &GameState, kind: BuildingKind, only_first: bool) -> Option<Hint> {
    let cost = blueprint::building(kind).cost;
    let solar = blueprint::building(BuildingKind::Solar).cost;
    state
        .colonies
        .iter()
        .filter(|c| !only_first || c.building_count(kind) == 0)
        .filter(|c| affords(c, &cost))
        .find_map(|colony| {
            if production::power_report_after(colony, kind).is_powered() {
                Some(Hint::act(
                    Action::Build {
                        kind,
                        colony: colony.world.clone(),
                    },
                    format!("Build a {kind} at {}", colony.name),
                ))
            } else if affords(colony, &solar) {
                Some(build_solar(colony, &format!("A {kind} would overload the grid")))
            } else {
                None
            }
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orrery_types::{ResourceKind, ShipId, Voyage};
    use rust_decimal_macros::dec;

    use super::*;

    fn setup() -> (Catalog, GameState) {
        let catalog = Catalog::sol().unwrap();
        let state = GameState::new(&catalog, 50).unwrap();
        (catalog, state)
    }

    fn earth() -> WorldId {
        WorldId::from("earth")
    }

    fn add_ship(state: &mut GameState, ship_type: ShipType) -> ShipId {
        let id = ShipId::new();
        state.fleet.insert(Ship {
            id,
            ship_type,
            name: format!("{ship_type}-1"),
            location: earth(),
            voyage: Voyage::Docked,
            cargo: Stockpile::new(),
        });
        id
    }

    #[test]
    fn opening_hint_is_a_probe() {
        let (catalog, state) = setup();
        let hint = suggest(&catalog, &state);
        assert_eq!(
            hint.action,
            Some(Action::ConstructShip {
                ship_type: ShipType::Probe,
                colony: earth(),
            })
        );
    }

    #[test]
    fn deficit_comes_first() {
        let (catalog, mut state) = setup();
        state
            .colonies
            .get_mut(&earth())
            .unwrap()
            .buildings
            .insert(BuildingKind::Foundry, 3);
        let hint = suggest(&catalog, &state);
        assert_eq!(
            hint.action,
            Some(Action::Build {
                kind: BuildingKind::Solar,
                colony: earth(),
            })
        );
        assert!(hint.message.contains("20 kW short"), "{}", hint.message);
    }

    #[test]
    fn unaffordable_deficit_waits() {
        let (catalog, mut state) = setup();
        let colony = state.colonies.get_mut(&earth()).unwrap();
        colony.buildings.insert(BuildingKind::Foundry, 3);
        colony.stockpile = Stockpile::new();
        let hint = suggest(&catalog, &state);
        assert_eq!(hint.action, None);
    }

    #[test]
    fn idle_probe_goes_to_nearest_unknown_world() {
        let (catalog, mut state) = setup();
        let probe = add_ship(&mut state, ShipType::Probe);
        let hint = suggest(&catalog, &state);
        // Luna shares Earth's order, so it is the closest target.
        assert_eq!(
            hint.action,
            Some(Action::Launch {
                ship: probe,
                destination: WorldId::from("luna"),
            })
        );
    }

    #[test]
    fn seeder_follows_a_survey() {
        let (catalog, mut state) = setup();
        let probe = add_ship(&mut state, ShipType::Probe);
        state.fleet.get_mut(&probe).unwrap().voyage = Voyage::InTransit {
            to: WorldId::from("ceres"),
            eta: 2,
        };
        state.ledger.mark_surveyed(&WorldId::from("mars"));
        let hint = suggest(&catalog, &state);
        assert_eq!(
            hint.action,
            Some(Action::ConstructShip {
                ship_type: ShipType::Seeder,
                colony: earth(),
            })
        );

        let seeder = add_ship(&mut state, ShipType::Seeder);
        let hint = suggest(&catalog, &state);
        assert_eq!(
            hint.action,
            Some(Action::Launch {
                ship: seeder,
                destination: WorldId::from("mars"),
            })
        );
    }

    #[test]
    fn overloading_build_suggests_solar() {
        let (catalog, mut state) = setup();
        let probe = add_ship(&mut state, ShipType::Probe);
        state.fleet.get_mut(&probe).unwrap().voyage = Voyage::InTransit {
            to: WorldId::from("ceres"),
            eta: 2,
        };
        // 50 kW generated, 30 used: a 15 kW refinery fits.
        let hint = suggest(&catalog, &state);
        assert_eq!(
            hint.action,
            Some(Action::Build {
                kind: BuildingKind::Refinery,
                colony: earth(),
            })
        );

        state
            .colonies
            .get_mut(&earth())
            .unwrap()
            .buildings
            .insert(BuildingKind::Refinery, 1);
        // Now 45 of 50 kW used; a drill (10 kW) would overload.
        let hint = suggest(&catalog, &state);
        assert_eq!(
            hint.action,
            Some(Action::Build {
                kind: BuildingKind::Solar,
                colony: earth(),
            })
        );
    }

    #[test]
    fn nothing_affordable_means_accumulate() {
        let (catalog, mut state) = setup();
        let probe = add_ship(&mut state, ShipType::Probe);
        state.fleet.get_mut(&probe).unwrap().voyage = Voyage::InTransit {
            to: WorldId::from("ceres"),
            eta: 2,
        };
        state.colonies.get_mut(&earth()).unwrap().stockpile =
            Stockpile::from([(ResourceKind::Fe, dec!(1))]);
        let hint = suggest(&catalog, &state);
        assert_eq!(hint, Hint::wait("Accumulate resources"));
    }
}
