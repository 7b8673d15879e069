//! The immutable registry of celestial bodies.
//!
//! A [`Catalog`] is validated once on construction and never mutated:
//! every top-level world has an orbital order, every moon names a
//! top-level parent and has no order of its own. Travel time between two
//! worlds is estimated from the difference in their effective orders,
//! where a moon resolves to its parent's order.

use std::collections::{BTreeMap, BTreeSet};

use orrery_types::{ResourceKind, World, WorldId};

use crate::error::WorldError;

/// Days of travel per unit of orbital-order distance at speed 1.
pub const DAYS_PER_ORDER: u32 = 3;

/// Minimum voyage length in days, regardless of speed or distance.
pub const MIN_VOYAGE_DAYS: u32 = 2;

/// Validated registry of worlds keyed by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    worlds: BTreeMap<WorldId, World>,
}

impl Catalog {
    /// Build a catalog from a list of worlds, validating the order/parent
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateWorld`], [`WorldError::MissingOrder`],
    /// [`WorldError::MoonWithOrder`] or [`WorldError::InvalidParent`] if the
    /// list is malformed.
    pub fn new(worlds: Vec<World>) -> Result<Self, WorldError> {
        let mut map = BTreeMap::new();
        for world in worlds {
            let id = world.id.clone();
            if map.insert(id.clone(), world).is_some() {
                return Err(WorldError::DuplicateWorld(id));
            }
        }

        for world in map.values() {
            match (&world.parent, world.order) {
                (None, None) => return Err(WorldError::MissingOrder(world.id.clone())),
                (Some(_), Some(_)) => return Err(WorldError::MoonWithOrder(world.id.clone())),
                (None, Some(_)) => {}
                (Some(parent), None) => {
                    let valid = map
                        .get(parent)
                        .is_some_and(|p: &World| !p.is_moon() && p.order.is_some());
                    if !valid {
                        return Err(WorldError::InvalidParent {
                            world: world.id.clone(),
                            parent: parent.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self { worlds: map })
    }

    /// The built-in Sol system catalog.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the hard-coded table is malformed (should
    /// not happen).
    #[allow(clippy::too_many_lines)]
    #[rustfmt::skip]
    pub fn sol() -> Result<Self, WorldError> {
        use ResourceKind::{C, Fe, He3, Ice, Si};

        Self::new(vec![
            planet("mercury", "Mercury", 1, &[Fe, Si], "Scorched iron-rich world closest to the Sun."),
            dead_planet("venus", "Venus", 2, &[C], "Crushing acid atmosphere. No landing survives."),
            planet("earth", "Earth", 3, &[Fe, Si, Ice, C], "Homeworld."),
            moon("luna", "Luna", "earth", &[Fe, Si, He3], "Regolith rich in helium-3."),
            planet("mars", "Mars", 4, &[Fe, Si, Ice], "Cold red desert with polar ice caps."),
            moon("phobos", "Phobos", "mars", &[Fe, C], "Carbonaceous captured asteroid."),
            planet("ceres", "Ceres", 5, &[Ice, C], "Dwarf planet in the asteroid belt."),
            gas_giant("jupiter", "Jupiter", 6, "King of the planets. Skimmable helium-3."),
            dead_moon("io", "Io", "jupiter", &[Si], "Volcanic hellscape bathed in radiation."),
            moon("europa", "Europa", "jupiter", &[Ice], "Ice shell over a global ocean."),
            moon("ganymede", "Ganymede", "jupiter", &[Fe, Ice], "Largest moon, magnetized iron core."),
            moon("callisto", "Callisto", "jupiter", &[Ice, Si], "Ancient cratered ice and rock."),
            gas_giant("saturn", "Saturn", 7, "Ringed giant."),
            moon("titan", "Titan", "saturn", &[C, Ice], "Methane lakes under a thick haze."),
            moon("enceladus", "Enceladus", "saturn", &[Ice], "Cryovolcanic geysers."),
            gas_giant("uranus", "Uranus", 8, "Tilted ice giant."),
            gas_giant("neptune", "Neptune", 9, "Windswept ice giant."),
            moon("triton", "Triton", "neptune", &[Ice, C], "Retrograde captured moon."),
            planet("pluto", "Pluto", 10, &[Ice], "Frozen edge of the system."),
        ])
    }

    /// Look up a world by id.
    pub fn get(&self, id: &WorldId) -> Option<&World> {
        self.worlds.get(id)
    }

    /// Look up a world by id, failing if it is not in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::WorldNotFound`] for unknown ids.
    pub fn world(&self, id: &WorldId) -> Result<&World, WorldError> {
        self.worlds
            .get(id)
            .ok_or_else(|| WorldError::WorldNotFound(id.clone()))
    }

    /// Whether the id is in the catalog.
    pub fn contains(&self, id: &WorldId) -> bool {
        self.worlds.contains_key(id)
    }

    /// Iterate worlds in id order.
    pub fn iter(&self) -> impl Iterator<Item = &World> {
        self.worlds.values()
    }

    /// Iterate world ids in id order.
    pub fn ids(&self) -> impl Iterator<Item = &WorldId> {
        self.worlds.keys()
    }

    /// Number of worlds in the catalog.
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// Orbital order of a world, resolving a moon to its parent's order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::WorldNotFound`] if the world or its parent is
    /// missing, or [`WorldError::MissingOrder`] if neither has an order.
    pub fn effective_order(&self, id: &WorldId) -> Result<u32, WorldError> {
        let world = self.world(id)?;
        match (&world.parent, world.order) {
            (_, Some(order)) => Ok(order),
            (Some(parent), None) => self
                .world(parent)?
                .order
                .ok_or_else(|| WorldError::MissingOrder(parent.clone())),
            (None, None) => Err(WorldError::MissingOrder(id.clone())),
        }
    }

    /// Estimated voyage length in whole days:
    /// `max(2, ceil(|to - from| * 3 / speed))`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ZeroSpeed`] if `speed` is zero, or a lookup
    /// error if either world is unknown.
    pub fn travel_days(&self, from: &WorldId, to: &WorldId, speed: u32) -> Result<u32, WorldError> {
        if speed == 0 {
            return Err(WorldError::ZeroSpeed);
        }
        let from_order = self.effective_order(from)?;
        let to_order = self.effective_order(to)?;
        let scaled = from_order
            .abs_diff(to_order)
            .checked_mul(DAYS_PER_ORDER)
            .ok_or(WorldError::ArithmeticOverflow)?;
        Ok(scaled.div_ceil(speed).max(MIN_VOYAGE_DAYS))
    }
}

// ---------------------------------------------------------------------------
// Table helpers
// ---------------------------------------------------------------------------

fn body(
    id: &str,
    name: &str,
    order: Option<u32>,
    parent: Option<&str>,
    resources: &[ResourceKind],
    description: &str,
) -> World {
    World {
        id: WorldId::from(id),
        name: name.to_owned(),
        order,
        parent: parent.map(WorldId::from),
        resources: resources.iter().copied().collect::<BTreeSet<_>>(),
        gas: false,
        dead: false,
        description: description.to_owned(),
    }
}

fn planet(id: &str, name: &str, order: u32, resources: &[ResourceKind], desc: &str) -> World {
    body(id, name, Some(order), None, resources, desc)
}

fn dead_planet(id: &str, name: &str, order: u32, resources: &[ResourceKind], desc: &str) -> World {
    World {
        dead: true,
        ..body(id, name, Some(order), None, resources, desc)
    }
}

fn gas_giant(id: &str, name: &str, order: u32, desc: &str) -> World {
    World {
        gas: true,
        ..body(id, name, Some(order), None, &[ResourceKind::He3], desc)
    }
}

fn moon(id: &str, name: &str, parent: &str, resources: &[ResourceKind], desc: &str) -> World {
    body(id, name, None, Some(parent), resources, desc)
}

fn dead_moon(id: &str, name: &str, parent: &str, resources: &[ResourceKind], desc: &str) -> World {
    World {
        dead: true,
        ..body(id, name, None, Some(parent), resources, desc)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sol() -> Catalog {
        Catalog::sol().unwrap()
    }

    #[test]
    fn sol_catalog_is_valid() {
        let catalog = sol();
        assert_eq!(catalog.len(), 19);
        assert!(catalog.contains(&WorldId::from("earth")));
    }

    #[test]
    fn moons_inherit_parent_order() {
        let catalog = sol();
        assert_eq!(catalog.effective_order(&WorldId::from("europa")).unwrap(), 6);
        assert_eq!(catalog.effective_order(&WorldId::from("luna")).unwrap(), 3);
        assert_eq!(catalog.effective_order(&WorldId::from("mars")).unwrap(), 4);
    }

    #[test]
    fn probe_from_order_three_to_five_takes_two_days() {
        let catalog = sol();
        let days = catalog
            .travel_days(&WorldId::from("earth"), &WorldId::from("ceres"), 10)
            .unwrap();
        assert_eq!(days, 2);
    }

    #[test]
    fn travel_rounds_up() {
        let catalog = sol();
        // |10 - 3| * 3 = 21, 21 / 4 = 5.25 -> 6
        let days = catalog
            .travel_days(&WorldId::from("earth"), &WorldId::from("pluto"), 4)
            .unwrap();
        assert_eq!(days, 6);
    }

    #[test]
    fn moon_to_parent_takes_minimum_voyage() {
        let catalog = sol();
        let days = catalog
            .travel_days(&WorldId::from("earth"), &WorldId::from("luna"), 1)
            .unwrap();
        assert_eq!(days, MIN_VOYAGE_DAYS);
    }

    #[test]
    fn zero_speed_is_rejected() {
        let catalog = sol();
        let result = catalog.travel_days(&WorldId::from("earth"), &WorldId::from("mars"), 0);
        assert!(matches!(result, Err(WorldError::ZeroSpeed)));
    }

    #[test]
    fn unknown_world_is_rejected() {
        let catalog = sol();
        let result = catalog.world(&WorldId::from("vulcan"));
        assert!(matches!(result, Err(WorldError::WorldNotFound(_))));
    }

    #[test]
    fn moon_with_own_order_is_rejected() {
        let mut bad = moon("m", "M", "p", &[], "");
        bad.order = Some(2);
        let result = Catalog::new(vec![planet("p", "P", 1, &[], ""), bad]);
        assert!(matches!(result, Err(WorldError::MoonWithOrder(_))));
    }

    #[test]
    fn moon_of_moon_is_rejected() {
        let result = Catalog::new(vec![
            planet("p", "P", 1, &[], ""),
            moon("m", "M", "p", &[], ""),
            moon("mm", "MM", "m", &[], ""),
        ]);
        assert!(matches!(result, Err(WorldError::InvalidParent { .. })));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::new(vec![
            planet("p", "P", 1, &[], ""),
            planet("p", "P2", 2, &[], ""),
        ]);
        assert!(matches!(result, Err(WorldError::DuplicateWorld(_))));
    }

    #[test]
    fn gas_giants_and_dead_worlds_are_not_colonizable() {
        let catalog = sol();
        for id in ["jupiter", "saturn", "venus", "io"] {
            assert!(!catalog.world(&WorldId::from(id)).unwrap().is_colonizable(), "{id}");
        }
        assert!(catalog.world(&WorldId::from("titan")).unwrap().is_colonizable());
    }
}
