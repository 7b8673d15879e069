//! Whole-state snapshots as a JSON value tree.
//!
//! A snapshot wraps a serialized [`GameState`] with a format version. On
//! restore every world reference is checked against the catalog, the
//! survey ledger is cross-checked with the colony store, and quantities and
//! voyage countdowns are range-checked, so a restored game satisfies the
//! same invariants as one that was played.

use orrery_types::{Stockpile, SurveyStatus, Voyage, WorldId};
use orrery_world::Catalog;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::GameState;

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur when capturing or restoring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The value tree could not be (de)serialized.
    #[error("snapshot serialization failed: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The snapshot was written by an incompatible format version.
    #[error("unsupported snapshot version {found} (expected {SNAPSHOT_VERSION})")]
    UnsupportedVersion {
        /// Version recorded in the snapshot.
        found: u32,
    },

    /// The snapshot references a world missing from the catalog.
    #[error("snapshot references unknown world {0}")]
    UnknownWorld(WorldId),

    /// The action log was saved with no room for entries.
    #[error("snapshot action log has zero capacity")]
    ZeroLogCapacity,

    /// Survey ledger and colony store disagree, or a quantity or voyage is
    /// out of range.
    #[error("inconsistent snapshot at {world}: {reason}")]
    Inconsistent {
        /// The world in question.
        world: WorldId,
        /// What disagrees.
        reason: &'static str,
    },
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    state: GameState,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: &'a GameState,
}

/// Serialize `state` into a value tree.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] if serialization fails.
pub fn capture(state: &GameState) -> Result<Value, SnapshotError> {
    Ok(serde_json::to_value(EnvelopeRef {
        version: SNAPSHOT_VERSION,
        state,
    })?)
}

/// Rebuild a state from a value tree and validate it against `catalog`.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the tree is malformed, of another version,
/// references unknown worlds, has a ledger that disagrees with the colony
/// store, holds a negative quantity or an in-transit ship with no days
/// left, or has a zero-capacity action log.
pub fn restore(catalog: &Catalog, value: Value) -> Result<GameState, SnapshotError> {
    let envelope: Envelope = serde_json::from_value(value)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: envelope.version,
        });
    }
    validate(catalog, &envelope.state)?;
    Ok(envelope.state)
}

fn known(catalog: &Catalog, world: &WorldId) -> Result<(), SnapshotError> {
    if catalog.contains(world) {
        Ok(())
    } else {
        Err(SnapshotError::UnknownWorld(world.clone()))
    }
}

fn non_negative(
    stock: &Stockpile,
    world: &WorldId,
    reason: &'static str,
) -> Result<(), SnapshotError> {
    if stock.values().any(Decimal::is_sign_negative) {
        return Err(SnapshotError::Inconsistent {
            world: world.clone(),
            reason,
        });
    }
    Ok(())
}

fn validate(catalog: &Catalog, state: &GameState) -> Result<(), SnapshotError> {
    if state.log.capacity() == 0 {
        return Err(SnapshotError::ZeroLogCapacity);
    }
    for (world, status) in state.ledger.iter() {
        known(catalog, world)?;
        if status == SurveyStatus::Colony && !state.colonies.contains(world) {
            return Err(SnapshotError::Inconsistent {
                world: world.clone(),
                reason: "ledger marks a colony but none exists",
            });
        }
    }
    for world in state.colonies.worlds() {
        known(catalog, world)?;
        if state.ledger.status(world) != SurveyStatus::Colony {
            return Err(SnapshotError::Inconsistent {
                world: world.clone(),
                reason: "colony exists but ledger does not mark it",
            });
        }
    }
    for colony in state.colonies.iter() {
        non_negative(&colony.stockpile, &colony.world, "negative stockpile")?;
    }
    for ship in state.fleet.iter() {
        known(catalog, &ship.location)?;
        non_negative(&ship.cargo, &ship.location, "negative cargo")?;
        if let Voyage::InTransit { to, eta } = &ship.voyage {
            known(catalog, to)?;
            if *eta == 0 {
                return Err(SnapshotError::Inconsistent {
                    world: to.clone(),
                    reason: "in-transit ship with no days remaining",
                });
            }
        }
    }
    Ok(())
}
