//! The engine's whole mutable state as one serializable aggregate.

use std::collections::BTreeMap;

use orrery_types::{ShipType, WorldId};
use orrery_world::{Catalog, HOME_WORLD, SurveyLedger, WorldError, blueprint};
use serde::{Deserialize, Serialize};

use crate::clock::DayClock;
use crate::colony::ColonyStore;
use crate::error::ActionError;
use crate::fleet::FleetRegistry;
use crate::log::ActionLog;

/// Day, survey ledger, colony store, fleet registry, action log, and the
/// per-type ship name counters.
///
/// Nothing outside this struct is needed to reproduce a game: restoring a
/// serialized `GameState` against the same catalog yields identical
/// subsequent ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The day counter.
    pub clock: DayClock,
    /// Survey status of every world.
    pub ledger: SurveyLedger,
    /// Colonies keyed by world.
    pub colonies: ColonyStore,
    /// All ships.
    pub fleet: FleetRegistry,
    /// Player-facing action log.
    pub log: ActionLog,
    /// Last sequence number used when naming each ship type.
    pub ship_sequence: BTreeMap<ShipType, u32>,
}

impl GameState {
    /// The opening position: day 0, the home colony, no ships.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::WorldNotFound`] if the catalog lacks the home
    /// world.
    pub fn new(catalog: &Catalog, log_capacity: usize) -> Result<Self, WorldError> {
        let home = WorldId::from(HOME_WORLD);
        let ledger = SurveyLedger::new(catalog, &home)?;
        let mut colonies = ColonyStore::new();
        colonies.insert(blueprint::home_colony());
        Ok(Self {
            clock: DayClock::new(),
            ledger,
            colonies,
            fleet: FleetRegistry::new(),
            log: ActionLog::new(log_capacity),
            ship_sequence: BTreeMap::new(),
        })
    }

    /// The current day.
    pub const fn day(&self) -> u64 {
        self.clock.day()
    }

    /// Append a log entry stamped with the current day.
    pub(crate) fn record(&mut self, message: impl Into<String>) {
        let day = self.day();
        self.log.push(day, message);
    }

    /// Reserve the next name for a ship of `ship_type`, e.g. `Probe-3`.
    pub(crate) fn next_ship_name(&mut self, ship_type: ShipType) -> Result<String, ActionError> {
        let seq = self.ship_sequence.entry(ship_type).or_insert(0);
        *seq = seq
            .checked_add(1)
            .ok_or_else(|| ActionError::ArithmeticOverflow {
                context: format!("{ship_type} name sequence"),
            })?;
        Ok(format!("{}-{}", ship_type.label(), seq))
    }
}
