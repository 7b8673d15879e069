//! Colony-side actions: building structures, constructing ships, and
//! loading hauler cargo.
//!
//! Every function validates all of its preconditions before touching
//! state, so a rejected action leaves the [`GameState`] exactly as it was.

use orrery_types::{BuildingKind, Ship, ShipId, ShipType, Stockpile, Voyage, WorldId};
use orrery_world::blueprint;
use rust_decimal::Decimal;
use tracing::debug;

use crate::action::ActionOutcome;
use crate::error::ActionError;
use crate::state::GameState;
use crate::stockpile;

fn overflow(context: &str) -> ActionError {
    ActionError::ArithmeticOverflow {
        context: context.to_owned(),
    }
}

/// Build one `kind` structure at the colony on `world`.
///
/// Power is not checked: a build may push the colony into deficit, which
/// only pauses its production.
///
/// # Errors
///
/// Returns [`ActionError::ColonyNotFound`] or
/// [`ActionError::InsufficientResources`]. State is unchanged on error.
pub fn build(
    state: &mut GameState,
    kind: BuildingKind,
    world: &WorldId,
) -> Result<ActionOutcome, ActionError> {
    let colony = state
        .colonies
        .get_mut(world)
        .ok_or_else(|| ActionError::ColonyNotFound(world.clone()))?;
    let bp = blueprint::building(kind);

    let count = colony
        .building_count(kind)
        .checked_add(1)
        .ok_or_else(|| overflow("building count"))?;
    stockpile::debit(&mut colony.stockpile, &bp.cost, world)?;
    colony.buildings.insert(kind, count);

    debug!(colony = %world, building = %kind, count, "Structure built");
    Ok(ActionOutcome::message(format!(
        "Built {kind} at {} ({count} total)",
        colony.name
    )))
}

/// Construct a ship of `ship_type` at the colony on `world`.
///
/// The new ship starts docked there with an empty hold and is named
/// `<Type>-<n>` from the per-type counter.
///
/// # Errors
///
/// Returns [`ActionError::ColonyNotFound`], [`ActionError::NoFoundry`],
/// or [`ActionError::InsufficientResources`]. State is unchanged on error.
pub fn construct_ship(
    state: &mut GameState,
    ship_type: ShipType,
    world: &WorldId,
) -> Result<ActionOutcome, ActionError> {
    let bp = blueprint::ship(ship_type);
    let colony = state
        .colonies
        .get(world)
        .ok_or_else(|| ActionError::ColonyNotFound(world.clone()))?;
    if !colony.has_foundry() {
        return Err(ActionError::NoFoundry {
            colony: world.clone(),
        });
    }

    // Debit a copy; commit only once the name is reserved.
    let mut stock = colony.stockpile.clone();
    stockpile::debit(&mut stock, &bp.cost, world)?;
    let colony_name = colony.name.clone();

    let name = state.next_ship_name(ship_type)?;
    if let Some(colony) = state.colonies.get_mut(world) {
        colony.stockpile = stock;
    }

    let id = ShipId::new();
    state.fleet.insert(Ship {
        id,
        ship_type,
        name: name.clone(),
        location: world.clone(),
        voyage: Voyage::Docked,
        cargo: Stockpile::new(),
    });

    debug!(ship = %name, colony = %world, "Ship constructed");
    Ok(ActionOutcome::for_ship(
        id,
        format!("{name} constructed at {colony_name}"),
    ))
}

/// Replace a docked hauler's cargo from the local colony.
///
/// Any cargo already aboard goes back to the stockpile first. Each
/// requested quantity is then clamped to what the colony holds and to the
/// capacity left, taking kinds in resource order; negative requests count
/// as zero. The loaded amounts become the new cargo.
///
/// # Errors
///
/// Returns [`ActionError::ShipNotFound`], [`ActionError::NoCargoCapacity`],
/// [`ActionError::ShipNotDocked`], or [`ActionError::ColonyNotFound`] if
/// the ship is not at a colony. State is unchanged on error.
pub fn load_cargo(
    state: &mut GameState,
    ship_id: ShipId,
    manifest: &Stockpile,
) -> Result<ActionOutcome, ActionError> {
    let ship = state
        .fleet
        .get(&ship_id)
        .ok_or(ActionError::ShipNotFound(ship_id))?;
    let capacity = blueprint::ship(ship.ship_type).cargo_capacity;
    if capacity.is_zero() {
        return Err(ActionError::NoCargoCapacity {
            ship: ship.name.clone(),
            ship_type: ship.ship_type,
        });
    }
    if !ship.is_idle() {
        return Err(ActionError::ShipNotDocked {
            ship: ship.name.clone(),
        });
    }
    let world = ship.location.clone();
    let colony = state
        .colonies
        .get(&world)
        .ok_or_else(|| ActionError::ColonyNotFound(world.clone()))?;

    let mut stock = colony.stockpile.clone();
    stockpile::credit(&mut stock, &ship.cargo)?;

    let mut remaining = capacity;
    let mut cargo = Stockpile::new();
    for (kind, requested) in manifest {
        let available = stockpile::quantity(&stock, *kind);
        let take = (*requested).max(Decimal::ZERO).min(available).min(remaining);
        if take.is_zero() {
            continue;
        }
        remaining = remaining
            .checked_sub(take)
            .ok_or_else(|| overflow("cargo capacity"))?;
        cargo.insert(*kind, take);
    }
    stockpile::debit(&mut stock, &cargo, &world)?;

    let ship_name = ship.name.clone();
    let colony_name = colony.name.clone();
    if let Some(colony) = state.colonies.get_mut(&world) {
        colony.stockpile = stock;
    }
    let message = format!(
        "{ship_name} loaded {} at {colony_name}",
        stockpile::describe(&cargo)
    );
    let units = stockpile::total(&cargo).unwrap_or(Decimal::MAX);
    if let Some(ship) = state.fleet.get_mut(&ship_id) {
        ship.cargo = cargo;
    }

    debug!(ship = %ship_name, colony = %world, units = %units, "Cargo loaded");
    Ok(ActionOutcome::for_ship(ship_id, message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orrery_types::ResourceKind;
    use orrery_world::Catalog;
    use rust_decimal_macros::dec;

    use super::*;

    fn setup() -> GameState {
        let catalog = Catalog::sol().unwrap();
        GameState::new(&catalog, 50).unwrap()
    }

    fn earth() -> WorldId {
        WorldId::from("earth")
    }

    fn set_stock(state: &mut GameState, stock: Stockpile) {
        state.colonies.get_mut(&earth()).unwrap().stockpile = stock;
    }

    #[test]
    fn build_debits_cost_and_counts() {
        let mut state = setup();
        let outcome = build(&mut state, BuildingKind::Drill, &earth()).unwrap();
        assert_eq!(outcome.message, "Built Drill at Earth Prime (2 total)");
        let colony = state.colonies.get(&earth()).unwrap();
        assert_eq!(colony.building_count(BuildingKind::Drill), 2);
        assert_eq!(colony.quantity(ResourceKind::Fe), dec!(108));
        assert_eq!(colony.quantity(ResourceKind::Si), dec!(76));
    }

    #[test]
    fn build_rejected_when_short_leaves_state_alone() {
        let mut state = setup();
        let stock = Stockpile::from([(ResourceKind::Fe, dec!(10)), (ResourceKind::Si, dec!(10))]);
        set_stock(&mut state, stock);
        let before = state.clone();
        let result = build(&mut state, BuildingKind::Drill, &earth());
        assert!(matches!(
            result,
            Err(ActionError::InsufficientResources { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn build_requires_a_colony() {
        let mut state = setup();
        let result = build(&mut state, BuildingKind::Solar, &WorldId::from("mars"));
        assert!(matches!(result, Err(ActionError::ColonyNotFound(_))));
    }

    #[test]
    fn construct_ship_names_and_docks_it() {
        let mut state = setup();
        let first = construct_ship(&mut state, ShipType::Probe, &earth()).unwrap();
        let second = construct_ship(&mut state, ShipType::Probe, &earth()).unwrap();
        assert_eq!(first.message, "Probe-1 constructed at Earth Prime");
        let ship = state.fleet.get(&second.ship.unwrap()).unwrap();
        assert_eq!(ship.name, "Probe-2");
        assert_eq!(ship.location, earth());
        assert!(ship.is_idle());
        assert_eq!(
            state.colonies.get(&earth()).unwrap().quantity(ResourceKind::Fe),
            dec!(100)
        );
    }

    #[test]
    fn construct_ship_needs_foundry() {
        let mut state = setup();
        state
            .colonies
            .get_mut(&earth())
            .unwrap()
            .buildings
            .remove(&BuildingKind::Foundry);
        let before = state.clone();
        let result = construct_ship(&mut state, ShipType::Probe, &earth());
        assert!(matches!(result, Err(ActionError::NoFoundry { .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn rejected_construction_does_not_consume_a_name() {
        let mut state = setup();
        set_stock(&mut state, Stockpile::new());
        assert!(construct_ship(&mut state, ShipType::Hauler, &earth()).is_err());
        set_stock(
            &mut state,
            Stockpile::from([(ResourceKind::Fe, dec!(40)), (ResourceKind::Si, dec!(10))]),
        );
        let outcome = construct_ship(&mut state, ShipType::Hauler, &earth()).unwrap();
        assert_eq!(outcome.message, "Hauler-1 constructed at Earth Prime");
    }

    fn hauler(state: &mut GameState) -> ShipId {
        construct_ship(state, ShipType::Hauler, &earth())
            .unwrap()
            .ship
            .unwrap()
    }

    #[test]
    fn load_clamps_to_stock_and_capacity() {
        let mut state = setup();
        let id = hauler(&mut state);
        // After the hauler: Fe 80, Si 70, Ice 40, C 20.
        let manifest = Stockpile::from([
            (ResourceKind::Fe, dec!(90)),
            (ResourceKind::Si, dec!(50)),
            (ResourceKind::Ice, dec!(-5)),
        ]);
        load_cargo(&mut state, id, &manifest).unwrap();
        let ship = state.fleet.get(&id).unwrap();
        assert_eq!(
            ship.cargo,
            Stockpile::from([(ResourceKind::Fe, dec!(80)), (ResourceKind::Si, dec!(20))])
        );
        let colony = state.colonies.get(&earth()).unwrap();
        assert_eq!(colony.quantity(ResourceKind::Fe), dec!(0));
        assert_eq!(colony.quantity(ResourceKind::Si), dec!(50));
        assert_eq!(colony.quantity(ResourceKind::Ice), dec!(40));
    }

    #[test]
    fn reload_returns_previous_cargo_first() {
        let mut state = setup();
        let id = hauler(&mut state);
        let ice = Stockpile::from([(ResourceKind::Ice, dec!(30))]);
        load_cargo(&mut state, id, &ice).unwrap();
        let carbon = Stockpile::from([(ResourceKind::C, dec!(5))]);
        load_cargo(&mut state, id, &carbon).unwrap();

        assert_eq!(state.fleet.get(&id).unwrap().cargo, carbon);
        let colony = state.colonies.get(&earth()).unwrap();
        assert_eq!(colony.quantity(ResourceKind::Ice), dec!(40));
        assert_eq!(colony.quantity(ResourceKind::C), dec!(15));
    }

    #[test]
    fn probes_cannot_load() {
        let mut state = setup();
        let probe = construct_ship(&mut state, ShipType::Probe, &earth())
            .unwrap()
            .ship
            .unwrap();
        let manifest = Stockpile::from([(ResourceKind::Fe, dec!(1))]);
        let result = load_cargo(&mut state, probe, &manifest);
        assert!(matches!(result, Err(ActionError::NoCargoCapacity { .. })));
    }

    #[test]
    fn hauler_away_from_colony_cannot_load() {
        let mut state = setup();
        let id = hauler(&mut state);
        state.fleet.get_mut(&id).unwrap().location = WorldId::from("mars");
        let manifest = Stockpile::from([(ResourceKind::Fe, dec!(1))]);
        let result = load_cargo(&mut state, id, &manifest);
        assert!(matches!(result, Err(ActionError::ColonyNotFound(_))));
    }
}
