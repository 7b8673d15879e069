//! Per-world discovery and ownership status.
//!
//! The [`SurveyLedger`] only moves a world forward along
//! `Unknown -> Surveyed -> Colony`. Surveying is idempotent; colonizing is
//! only legal from `Surveyed`. There is no operation that moves a world
//! backward.

use std::collections::BTreeMap;

use orrery_types::{SurveyStatus, WorldId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::WorldError;

/// Survey status of every catalog world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyLedger {
    statuses: BTreeMap<WorldId, SurveyStatus>,
}

impl SurveyLedger {
    /// Create a ledger with every catalog world `Unknown` except `home`,
    /// which starts as a colony.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::WorldNotFound`] if `home` is not in the catalog.
    pub fn new(catalog: &Catalog, home: &WorldId) -> Result<Self, WorldError> {
        if !catalog.contains(home) {
            return Err(WorldError::WorldNotFound(home.clone()));
        }
        let statuses = catalog
            .ids()
            .map(|id| {
                let status = if id == home {
                    SurveyStatus::Colony
                } else {
                    SurveyStatus::Unknown
                };
                (id.clone(), status)
            })
            .collect();
        Ok(Self { statuses })
    }

    /// Rebuild a ledger from raw entries (snapshot restore).
    pub const fn from_entries(statuses: BTreeMap<WorldId, SurveyStatus>) -> Self {
        Self { statuses }
    }

    /// Current status of a world. Worlds absent from the ledger read as
    /// `Unknown`.
    pub fn status(&self, world: &WorldId) -> SurveyStatus {
        self.statuses.get(world).copied().unwrap_or_default()
    }

    /// Advance a world from `Unknown` to `Surveyed`.
    ///
    /// Returns `true` if the status changed, `false` if the world was
    /// already surveyed or colonized.
    pub fn mark_surveyed(&mut self, world: &WorldId) -> bool {
        let status = self.statuses.entry(world.clone()).or_default();
        if *status == SurveyStatus::Unknown {
            *status = SurveyStatus::Surveyed;
            debug!(%world, "World surveyed");
            true
        } else {
            false
        }
    }

    /// Advance a world from `Surveyed` to `Colony`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotSurveyed`] if the world is not currently
    /// `Surveyed`; the ledger is left unchanged.
    pub fn mark_colonized(&mut self, world: &WorldId) -> Result<(), WorldError> {
        let status = self.status(world);
        if status != SurveyStatus::Surveyed {
            return Err(WorldError::NotSurveyed {
                world: world.clone(),
                status,
            });
        }
        self.statuses.insert(world.clone(), SurveyStatus::Colony);
        debug!(%world, "World colonized");
        Ok(())
    }

    /// Number of worlds with the given status.
    pub fn count(&self, status: SurveyStatus) -> usize {
        self.statuses.values().filter(|s| **s == status).count()
    }

    /// Worlds with the given status, in id order.
    pub fn with_status(&self, status: SurveyStatus) -> impl Iterator<Item = &WorldId> {
        self.statuses
            .iter()
            .filter(move |(_, s)| **s == status)
            .map(|(id, _)| id)
    }

    /// Iterate all entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&WorldId, SurveyStatus)> {
        self.statuses.iter().map(|(id, s)| (id, *s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ledger() -> SurveyLedger {
        let catalog = Catalog::sol().unwrap();
        SurveyLedger::new(&catalog, &WorldId::from("earth")).unwrap()
    }

    #[test]
    fn home_starts_colonized_everything_else_unknown() {
        let ledger = ledger();
        assert_eq!(ledger.status(&WorldId::from("earth")), SurveyStatus::Colony);
        assert_eq!(ledger.status(&WorldId::from("mars")), SurveyStatus::Unknown);
        assert_eq!(ledger.count(SurveyStatus::Colony), 1);
        assert_eq!(ledger.count(SurveyStatus::Unknown), 18);
    }

    #[test]
    fn unknown_home_is_rejected() {
        let catalog = Catalog::sol().unwrap();
        let result = SurveyLedger::new(&catalog, &WorldId::from("vulcan"));
        assert!(result.is_err());
    }

    #[test]
    fn survey_is_idempotent() {
        let mut ledger = ledger();
        let mars = WorldId::from("mars");
        assert!(ledger.mark_surveyed(&mars));
        assert!(!ledger.mark_surveyed(&mars));
        assert_eq!(ledger.status(&mars), SurveyStatus::Surveyed);
    }

    #[test]
    fn survey_never_downgrades_a_colony() {
        let mut ledger = ledger();
        let earth = WorldId::from("earth");
        assert!(!ledger.mark_surveyed(&earth));
        assert_eq!(ledger.status(&earth), SurveyStatus::Colony);
    }

    #[test]
    fn colonize_requires_surveyed() {
        let mut ledger = ledger();
        let mars = WorldId::from("mars");
        let result = ledger.mark_colonized(&mars);
        assert!(matches!(
            result,
            Err(WorldError::NotSurveyed {
                status: SurveyStatus::Unknown,
                ..
            })
        ));
        assert_eq!(ledger.status(&mars), SurveyStatus::Unknown);

        ledger.mark_surveyed(&mars);
        assert!(ledger.mark_colonized(&mars).is_ok());
        assert_eq!(ledger.status(&mars), SurveyStatus::Colony);

        // A second colonization attempt is rejected, not repeated.
        assert!(ledger.mark_colonized(&mars).is_err());
    }

    #[test]
    fn with_status_lists_matching_worlds() {
        let mut ledger = ledger();
        ledger.mark_surveyed(&WorldId::from("titan"));
        ledger.mark_surveyed(&WorldId::from("ceres"));
        let surveyed: Vec<&WorldId> = ledger.with_status(SurveyStatus::Surveyed).collect();
        assert_eq!(surveyed, vec![&WorldId::from("ceres"), &WorldId::from("titan")]);
    }
}
