//! Tick cycle: one simulated day.
//!
//! Each tick runs these phases in order:
//!
//! 1. **Advance** -- increment the day counter.
//!
//! 2. **Movement** -- count down every in-transit ship; ships on their
//!    last day dock at the destination with an arrival pending.
//!
//! 3. **Production** -- per colony, compare power generation to draw and
//!    accrue resources when powered. Deficit is silent and surfaces only
//!    in the [`TickSummary`].
//!
//! 4. **Arrivals** -- resolve every pending arrival exactly once (see
//!    [`crate::arrival`]). A colony founded here first produces on the
//!    next tick.
//!
//! The whole tick runs against a copy of the state that replaces the live
//! one only if every phase succeeds. The cycle is deterministic given the
//! same starting state.

use std::collections::BTreeMap;

use orrery_types::WorldId;
use orrery_world::Catalog;
use tracing::{debug, info};

use crate::arrival::{self, ArrivalReport};
use crate::clock::ClockError;
use crate::error::ActionError;
use crate::movement;
use crate::production::{self, ProductionOutcome};
use crate::state::GameState;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A colony references a world outside the catalog.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: orrery_world::WorldError,
    },

    /// A production or arrival update failed.
    #[error("state update failed: {source}")]
    Update {
        /// The underlying action error.
        #[from]
        source: ActionError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The day that was executed.
    pub day: u64,
    /// Ships that finished their voyage this tick.
    pub arrived: Vec<orrery_types::ShipId>,
    /// Production outcome at each colony that existed when production ran.
    pub production: BTreeMap<WorldId, ProductionOutcome>,
    /// Resolved arrival effects.
    pub arrivals: Vec<ArrivalReport>,
    /// Ships still in transit at end of tick.
    pub ships_in_transit: usize,
}

impl TickSummary {
    /// Colonies whose production was suppressed by a power deficit.
    pub fn colonies_in_deficit(&self) -> impl Iterator<Item = &WorldId> {
        self.production
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ProductionOutcome::PowerDeficit(_)))
            .map(|(world, _)| world)
    }
}

/// Run one complete tick.
///
/// # Errors
///
/// Returns [`TickError`] if the day counter overflows, a colony sits on a
/// world missing from the catalog, or a stockpile quantity overflows. The
/// state is unchanged on error.
pub fn run_tick(catalog: &Catalog, state: &mut GameState) -> Result<TickSummary, TickError> {
    let mut next = state.clone();

    // Phase 1: advance
    let day = next.clock.advance()?;

    // Phase 2: movement
    let arrived = movement::advance_ships(&mut next.fleet);

    // Phase 3: production
    let production = run_production(catalog, &mut next)?;

    // Phase 4: arrivals
    let arrivals = arrival::resolve_arrivals(catalog, &mut next)?;

    let ships_in_transit = next.fleet.in_transit();
    *state = next;

    let summary = TickSummary {
        day,
        arrived,
        production,
        arrivals,
        ships_in_transit,
    };
    debug!(
        day,
        arrivals = summary.arrivals.len(),
        ships_in_transit,
        "Tick complete"
    );
    Ok(summary)
}

fn run_production(
    catalog: &Catalog,
    state: &mut GameState,
) -> Result<BTreeMap<WorldId, ProductionOutcome>, TickError> {
    let mut outcomes = BTreeMap::new();
    for colony in state.colonies.iter_mut() {
        let world = catalog.world(&colony.world)?;
        let outcome = production::produce(colony, world)?;
        if let ProductionOutcome::PowerDeficit(power) = &outcome {
            info!(
                colony = %colony.world,
                generated_kw = power.generated_kw,
                used_kw = power.used_kw,
                "Production suppressed by power deficit"
            );
        }
        outcomes.insert(colony.world.clone(), outcome);
    }
    Ok(outcomes)
}
