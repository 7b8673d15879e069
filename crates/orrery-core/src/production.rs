//! Power balance and per-day resource accrual.
//!
//! Power generated is `25 kW` per solar array plus `100 kW` per reactor.
//! Power used is `10 kW` per drill, `15 kW` per refinery, `20 kW` per
//! foundry and `5 kW` per habitat. When generation covers usage, every
//! resource kind the world yields accrues `0.5 * drills` units per day,
//! doubled if the colony has any refinery. In deficit nothing is mined;
//! the buildings stay built and the colony simply idles until power is
//! restored.

use orrery_types::{BuildingKind, Colony, Stockpile, World};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::stockpile;

/// Units per drill per day before the refinery bonus.
const BASE_YIELD_PER_DRILL: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Output multiplier when a refinery is present.
const REFINERY_MULTIPLIER: u32 = 2;

/// Power balance of a colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerReport {
    /// Total generation in kW.
    pub generated_kw: u32,
    /// Total draw in kW.
    pub used_kw: u32,
}

impl PowerReport {
    /// Whether generation covers draw.
    pub const fn is_powered(&self) -> bool {
        self.generated_kw >= self.used_kw
    }

    /// Generation minus draw. Negative in deficit.
    pub fn surplus_kw(&self) -> i64 {
        i64::from(self.generated_kw).saturating_sub(i64::from(self.used_kw))
    }
}

/// What happened at one colony during the production phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionOutcome {
    /// Resources were added to the stockpile.
    Produced(Stockpile),
    /// Draw exceeded generation; nothing was mined.
    PowerDeficit(PowerReport),
    /// Powered, but there was nothing to mine (no drills or a barren world).
    Idle,
}

/// Compute a colony's power balance.
///
/// Saturates rather than overflowing; no realistic building count gets
/// near `u32::MAX` kW.
pub fn power_report(colony: &Colony) -> PowerReport {
    let mut generated_kw: u32 = 0;
    let mut used_kw: u32 = 0;
    for (kind, count) in &colony.buildings {
        let bp = orrery_world::blueprint::building(*kind);
        generated_kw = generated_kw.saturating_add(bp.generates_kw.saturating_mul(*count));
        used_kw = used_kw.saturating_add(bp.consumes_kw.saturating_mul(*count));
    }
    PowerReport {
        generated_kw,
        used_kw,
    }
}

/// Power balance the colony would have after adding one `kind` building.
pub fn power_report_after(colony: &Colony, kind: BuildingKind) -> PowerReport {
    let current = power_report(colony);
    let bp = orrery_world::blueprint::building(kind);
    PowerReport {
        generated_kw: current.generated_kw.saturating_add(bp.generates_kw),
        used_kw: current.used_kw.saturating_add(bp.consumes_kw),
    }
}

/// Units of each resource kind one powered day yields.
///
/// # Errors
///
/// Returns [`ActionError::ArithmeticOverflow`] if the multiplication
/// overflows.
pub fn daily_yield(colony: &Colony) -> Result<Decimal, ActionError> {
    let drills = Decimal::from(colony.building_count(BuildingKind::Drill));
    let multiplier = if colony.building_count(BuildingKind::Refinery) > 0 {
        Decimal::from(REFINERY_MULTIPLIER)
    } else {
        Decimal::ONE
    };
    BASE_YIELD_PER_DRILL
        .checked_mul(drills)
        .and_then(|v| v.checked_mul(multiplier))
        .ok_or_else(|| ActionError::ArithmeticOverflow {
            context: format!("daily yield at {}", colony.world),
        })
}

/// Run one day of production at a colony.
///
/// The stockpile is replaced in one step: either every kind accrues or
/// none does.
///
/// # Errors
///
/// Returns [`ActionError::ArithmeticOverflow`] if a quantity overflows;
/// the colony is unchanged.
pub fn produce(colony: &mut Colony, world: &World) -> Result<ProductionOutcome, ActionError> {
    let power = power_report(colony);
    if !power.is_powered() {
        return Ok(ProductionOutcome::PowerDeficit(power));
    }

    let per_kind = daily_yield(colony)?;
    if per_kind.is_zero() || world.resources.is_empty() {
        return Ok(ProductionOutcome::Idle);
    }

    let mined: Stockpile = world.resources.iter().map(|kind| (*kind, per_kind)).collect();
    stockpile::credit(&mut colony.stockpile, &mined)?;
    Ok(ProductionOutcome::Produced(mined))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use orrery_types::{ResourceKind, WorldId};
    use rust_decimal_macros::dec;

    use super::*;

    fn world(resources: &[ResourceKind]) -> World {
        World {
            id: WorldId::from("mars"),
            name: "Mars".to_owned(),
            order: Some(4),
            parent: None,
            resources: resources.iter().copied().collect::<BTreeSet<_>>(),
            gas: false,
            dead: false,
            description: String::new(),
        }
    }

    fn colony(buildings: &[(BuildingKind, u32)]) -> Colony {
        Colony {
            world: WorldId::from("mars"),
            name: "Mars Colony".to_owned(),
            stockpile: Stockpile::from([
                (ResourceKind::Fe, dec!(10)),
                (ResourceKind::Si, dec!(10)),
            ]),
            buildings: buildings.iter().copied().collect::<BTreeMap<_, _>>(),
            population: 50,
        }
    }

    #[test]
    fn powered_colony_mines_half_unit_per_drill() {
        let mut c = colony(&[
            (BuildingKind::Solar, 2),
            (BuildingKind::Drill, 1),
            (BuildingKind::Foundry, 1),
        ]);
        let w = world(&[ResourceKind::Fe, ResourceKind::Si, ResourceKind::Ice]);
        let report = power_report(&c);
        assert_eq!(report.generated_kw, 50);
        assert_eq!(report.used_kw, 30);

        let outcome = produce(&mut c, &w).unwrap();
        assert!(matches!(outcome, ProductionOutcome::Produced(_)));
        assert_eq!(c.quantity(ResourceKind::Fe), dec!(10.5));
        assert_eq!(c.quantity(ResourceKind::Si), dec!(10.5));
        assert_eq!(c.quantity(ResourceKind::Ice), dec!(0.5));
    }

    #[test]
    fn deficit_leaves_stockpile_unchanged() {
        // 2 solar = 50 kW; 1 drill + 4 foundries = 90 kW.
        let mut c = colony(&[
            (BuildingKind::Solar, 2),
            (BuildingKind::Drill, 1),
            (BuildingKind::Foundry, 4),
        ]);
        let before = c.stockpile.clone();
        let w = world(&[ResourceKind::Fe, ResourceKind::Si]);
        let outcome = produce(&mut c, &w).unwrap();
        let expected = PowerReport {
            generated_kw: 50,
            used_kw: 90,
        };
        assert_eq!(outcome, ProductionOutcome::PowerDeficit(expected));
        assert_eq!(expected.surplus_kw(), -40);
        assert_eq!(c.stockpile, before);
        assert_eq!(c.building_count(BuildingKind::Foundry), 4);
    }

    #[test]
    fn refinery_doubles_output() {
        let mut c = colony(&[
            (BuildingKind::Reactor, 1),
            (BuildingKind::Drill, 2),
            (BuildingKind::Refinery, 1),
        ]);
        assert_eq!(daily_yield(&c).unwrap(), dec!(2.0));
        let w = world(&[ResourceKind::C]);
        produce(&mut c, &w).unwrap();
        assert_eq!(c.quantity(ResourceKind::C), dec!(2.0));
    }

    #[test]
    fn balanced_power_counts_as_powered() {
        let c = colony(&[
            (BuildingKind::Solar, 1),
            (BuildingKind::Drill, 1),
            (BuildingKind::Foundry, 1),
        ]);
        // 25 generated, 30 used
        assert!(!power_report(&c).is_powered());
        let c = colony(&[(BuildingKind::Solar, 2), (BuildingKind::Drill, 5)]);
        // 50 generated, 50 used
        assert!(power_report(&c).is_powered());
    }

    #[test]
    fn no_drills_means_idle() {
        let mut c = colony(&[(BuildingKind::Solar, 1)]);
        let w = world(&[ResourceKind::Fe]);
        assert_eq!(produce(&mut c, &w).unwrap(), ProductionOutcome::Idle);
    }

    #[test]
    fn barren_world_means_idle() {
        let mut c = colony(&[(BuildingKind::Solar, 1), (BuildingKind::Drill, 1)]);
        let w = world(&[]);
        assert_eq!(produce(&mut c, &w).unwrap(), ProductionOutcome::Idle);
    }

    #[test]
    fn projected_power_includes_new_building() {
        let c = colony(&[(BuildingKind::Solar, 1), (BuildingKind::Drill, 1)]);
        let after = power_report_after(&c, BuildingKind::Refinery);
        assert_eq!(after.used_kw, 25);
        assert!(after.is_powered());
        let after = power_report_after(&c, BuildingKind::Foundry);
        assert!(!after.is_powered());
    }
}
