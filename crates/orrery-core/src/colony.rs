//! The colony store: economic state of every settled world.
//!
//! A colony exists for a world iff that world's survey status is
//! `Colony`. The store itself only guarantees that a world holds at most
//! one colony; the tick cycle and snapshot restore keep it in step with
//! the survey ledger.

use std::collections::BTreeMap;

use orrery_types::{Colony, WorldId};
use serde::{Deserialize, Serialize};

/// All colonies keyed by world.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColonyStore {
    colonies: BTreeMap<WorldId, Colony>,
}

impl ColonyStore {
    /// An empty store.
    pub const fn new() -> Self {
        Self {
            colonies: BTreeMap::new(),
        }
    }

    /// Look up the colony on a world.
    pub fn get(&self, world: &WorldId) -> Option<&Colony> {
        self.colonies.get(world)
    }

    /// Mutable lookup, for engine operations only.
    pub(crate) fn get_mut(&mut self, world: &WorldId) -> Option<&mut Colony> {
        self.colonies.get_mut(world)
    }

    /// Whether a colony exists on the world.
    pub fn contains(&self, world: &WorldId) -> bool {
        self.colonies.contains_key(world)
    }

    /// Add a colony. Returns `false` and leaves the store unchanged if the
    /// world is already settled.
    pub fn insert(&mut self, colony: Colony) -> bool {
        if self.colonies.contains_key(&colony.world) {
            return false;
        }
        self.colonies.insert(colony.world.clone(), colony);
        true
    }

    /// Iterate colonies in world-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Colony> {
        self.colonies.values()
    }

    /// Mutable iteration, for the production phase.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Colony> {
        self.colonies.values_mut()
    }

    /// Settled world ids in order.
    pub fn worlds(&self) -> impl Iterator<Item = &WorldId> {
        self.colonies.keys()
    }

    /// Number of colonies.
    pub fn len(&self) -> usize {
        self.colonies.len()
    }

    /// Whether there are no colonies.
    pub fn is_empty(&self) -> bool {
        self.colonies.is_empty()
    }
}
