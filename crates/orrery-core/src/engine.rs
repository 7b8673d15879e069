//! The engine facade: one catalog plus one game state, and the synchronous
//! entry points that read and mutate them.
//!
//! Every player action is validated, applied, and recorded in the action
//! log before the call returns. Rejected actions are logged too, with the
//! error text as the message, and leave the state untouched.

use orrery_types::{BuildingKind, Colony, Ship, ShipId, ShipType, Stockpile, WorldId};
use orrery_world::{Catalog, SurveyLedger, WorldError};
use serde_json::Value;
use tracing::{info, warn};

use crate::action::{Action, ActionOutcome};
use crate::colony::ColonyStore;
use crate::config::RulesConfig;
use crate::economy;
use crate::error::ActionError;
use crate::fleet::FleetRegistry;
use crate::hint::{self, Hint};
use crate::log::ActionLog;
use crate::movement;
use crate::production::{self, PowerReport};
use crate::snapshot::{self, SnapshotError};
use crate::state::GameState;
use crate::tick::{self, TickError, TickSummary};

/// The simulation engine.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    state: GameState,
}

impl Engine {
    /// Start a new game on `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::WorldNotFound`] if the catalog lacks the home
    /// world.
    pub fn new(catalog: Catalog, rules: &RulesConfig) -> Result<Self, WorldError> {
        let state = GameState::new(&catalog, rules.action_log_capacity)?;
        info!(
            worlds = catalog.len(),
            log_capacity = rules.action_log_capacity,
            "Engine initialized"
        );
        Ok(Self { catalog, state })
    }

    /// Start a new game in the Sol system.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the built-in catalog fails validation.
    pub fn sol(rules: &RulesConfig) -> Result<Self, WorldError> {
        Self::new(Catalog::sol()?, rules)
    }

    // -----------------------------------------------------------------------
    // Read model
    // -----------------------------------------------------------------------

    /// The world catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The full game state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The current day.
    pub const fn day(&self) -> u64 {
        self.state.day()
    }

    /// Survey status of every world.
    pub const fn ledger(&self) -> &SurveyLedger {
        &self.state.ledger
    }

    /// All colonies.
    pub const fn colonies(&self) -> &ColonyStore {
        &self.state.colonies
    }

    /// The colony on `world`, if any.
    pub fn colony(&self, world: &WorldId) -> Option<&Colony> {
        self.state.colonies.get(world)
    }

    /// All ships.
    pub const fn fleet(&self) -> &FleetRegistry {
        &self.state.fleet
    }

    /// One ship.
    pub fn ship(&self, id: &ShipId) -> Option<&Ship> {
        self.state.fleet.get(id)
    }

    /// The action log.
    pub const fn log(&self) -> &ActionLog {
        &self.state.log
    }

    /// Power balance of the colony on `world`.
    pub fn power_report(&self, world: &WorldId) -> Option<PowerReport> {
        self.colony(world).map(production::power_report)
    }

    /// Worlds the ship could launch to right now.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::ShipNotFound`] for unknown ids.
    pub fn eligible_destinations(&self, id: ShipId) -> Result<Vec<WorldId>, ActionError> {
        let ship = self.ship(&id).ok_or(ActionError::ShipNotFound(id))?;
        Ok(movement::eligible_destinations(
            &self.catalog,
            &self.state.ledger,
            ship,
        ))
    }

    /// Suggest the next move.
    pub fn hint(&self) -> Hint {
        hint::suggest(&self.catalog, &self.state)
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Build one structure at a colony.
    ///
    /// # Errors
    ///
    /// See [`economy::build`].
    pub fn build(
        &mut self,
        kind: BuildingKind,
        colony: &WorldId,
    ) -> Result<ActionOutcome, ActionError> {
        let result = economy::build(&mut self.state, kind, colony);
        self.record("build", result)
    }

    /// Construct a ship at a colony with a foundry.
    ///
    /// # Errors
    ///
    /// See [`economy::construct_ship`].
    pub fn construct_ship(
        &mut self,
        ship_type: ShipType,
        colony: &WorldId,
    ) -> Result<ActionOutcome, ActionError> {
        let result = economy::construct_ship(&mut self.state, ship_type, colony);
        self.record("construct_ship", result)
    }

    /// Replace a docked hauler's cargo.
    ///
    /// # Errors
    ///
    /// See [`economy::load_cargo`].
    pub fn load_cargo(
        &mut self,
        ship: ShipId,
        manifest: &Stockpile,
    ) -> Result<ActionOutcome, ActionError> {
        let result = economy::load_cargo(&mut self.state, ship, manifest);
        self.record("load_cargo", result)
    }

    /// Launch a docked ship.
    ///
    /// # Errors
    ///
    /// See [`movement::launch`].
    pub fn launch(
        &mut self,
        ship: ShipId,
        destination: &WorldId,
    ) -> Result<ActionOutcome, ActionError> {
        let result = movement::launch(&self.catalog, &mut self.state, ship, destination);
        self.record("launch", result)
    }

    /// Dispatch an [`Action`] value to its entry point.
    ///
    /// # Errors
    ///
    /// Whatever the underlying action returns.
    pub fn perform(&mut self, action: &Action) -> Result<ActionOutcome, ActionError> {
        match action {
            Action::Build { kind, colony } => self.build(*kind, colony),
            Action::ConstructShip { ship_type, colony } => self.construct_ship(*ship_type, colony),
            Action::LoadCargo { ship, manifest } => self.load_cargo(*ship, manifest),
            Action::Launch { ship, destination } => self.launch(*ship, destination),
        }
    }

    fn record(
        &mut self,
        action: &'static str,
        result: Result<ActionOutcome, ActionError>,
    ) -> Result<ActionOutcome, ActionError> {
        match &result {
            Ok(outcome) => {
                info!(day = self.day(), action, message = %outcome.message, "Action accepted");
                self.state.record(outcome.message.clone());
            }
            Err(err) => {
                warn!(
                    day = self.day(),
                    action,
                    kind = ?err.kind(),
                    error = %err,
                    "Action rejected"
                );
                self.state.record(format!("Rejected: {err}"));
            }
        }
        result
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Run one full day, including arrival resolution.
    ///
    /// # Errors
    ///
    /// See [`tick::run_tick`]; state is unchanged on error.
    pub fn tick(&mut self) -> Result<TickSummary, TickError> {
        tick::run_tick(&self.catalog, &mut self.state)
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Serialize the whole state into a value tree.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn snapshot(&self) -> Result<Value, SnapshotError> {
        snapshot::capture(&self.state)
    }

    /// Rebuild an engine from a snapshot taken against the same catalog.
    ///
    /// # Errors
    ///
    /// See [`snapshot::restore`].
    pub fn restore(catalog: Catalog, value: Value) -> Result<Self, SnapshotError> {
        let state = snapshot::restore(&catalog, value)?;
        info!(day = state.day(), "Engine restored from snapshot");
        Ok(Self { catalog, state })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use orrery_types::{ResourceKind, SurveyStatus};
    use rust_decimal_macros::dec;

    use super::*;

    fn engine() -> Engine {
        Engine::sol(&RulesConfig::default()).unwrap()
    }

    fn earth() -> WorldId {
        WorldId::from("earth")
    }

    #[test]
    fn accepted_action_is_logged() {
        let mut engine = engine();
        let outcome = engine.build(BuildingKind::Solar, &earth()).unwrap();
        assert_eq!(
            engine.log().latest().map(|e| e.message.as_str()),
            Some(outcome.message.as_str())
        );
    }

    #[test]
    fn rejected_action_is_logged_and_state_kept() {
        let mut engine = engine();
        let before = engine.colony(&earth()).cloned();
        let result = engine.build(BuildingKind::Reactor, &earth());
        assert!(matches!(
            result,
            Err(ActionError::InsufficientResources { .. })
        ));
        assert_eq!(engine.colony(&earth()).cloned(), before);
        let entry = engine.log().latest().unwrap();
        assert!(entry.message.starts_with("Rejected: insufficient resources"));
    }

    #[test]
    fn perform_dispatches_actions() {
        let mut engine = engine();
        let outcome = engine
            .perform(&Action::ConstructShip {
                ship_type: ShipType::Probe,
                colony: earth(),
            })
            .unwrap();
        let probe = outcome.ship.unwrap();
        engine
            .perform(&Action::Launch {
                ship: probe,
                destination: WorldId::from("mars"),
            })
            .unwrap();
        assert!(engine.ship(&probe).unwrap().is_moving());
    }

    #[test]
    fn probe_and_seeder_settle_a_world() {
        let mut engine = engine();
        let probe = engine
            .construct_ship(ShipType::Probe, &earth())
            .unwrap()
            .ship
            .unwrap();
        let luna = WorldId::from("luna");
        engine.launch(probe, &luna).unwrap();
        engine.tick().unwrap();
        engine.tick().unwrap();
        assert_eq!(engine.ledger().status(&luna), SurveyStatus::Surveyed);

        let seeder = engine
            .construct_ship(ShipType::Seeder, &earth())
            .unwrap()
            .ship
            .unwrap();
        engine.launch(seeder, &luna).unwrap();
        engine.tick().unwrap();
        engine.tick().unwrap();
        assert_eq!(engine.ledger().status(&luna), SurveyStatus::Colony);
        let colony = engine.colony(&luna).unwrap();
        assert_eq!(colony.name, "Luna Colony");
        assert_eq!(colony.quantity(ResourceKind::Fe), dec!(20));
    }

    #[test]
    fn snapshot_restores_to_equal_engine() {
        let mut engine = engine();
        engine.construct_ship(ShipType::Probe, &earth()).unwrap();
        engine.tick().unwrap();
        let value = engine.snapshot().unwrap();
        let restored = Engine::restore(Catalog::sol().unwrap(), value).unwrap();
        assert_eq!(restored.state(), engine.state());
    }

    #[test]
    fn zero_capacity_log_snapshot_is_refused() {
        let engine = engine();
        let mut value = engine.snapshot().unwrap();
        value["state"]["log"]["capacity"] = Value::from(0);
        assert!(matches!(
            Engine::restore(Catalog::sol().unwrap(), value),
            Err(SnapshotError::ZeroLogCapacity)
        ));
    }

    #[test]
    fn power_report_for_home() {
        let engine = engine();
        let report = engine.power_report(&earth()).unwrap();
        assert_eq!(report.generated_kw, 50);
        assert_eq!(report.used_kw, 30);
        assert!(engine.power_report(&WorldId::from("mars")).is_none());
    }
}
