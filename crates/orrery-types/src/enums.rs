//! Closed kinds for the Orrery simulation.
//!
//! Every catalog tag (resources, buildings, ship types, survey stages,
//! tick speeds) is a sum type so that each consumption site is an
//! exhaustive `match`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A resource a world can yield and a colony can stockpile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Iron, the structural base of every blueprint.
    Fe,
    /// Silicon for panels and electronics.
    Si,
    /// Water ice.
    Ice,
    /// Helium-3 fusion fuel.
    He3,
    /// Carbon and hydrocarbons.
    C,
}

impl ResourceKind {
    /// All resource kinds in display order.
    pub const ALL: [Self; 5] = [Self::Fe, Self::Si, Self::Ice, Self::He3, Self::C];

    /// Short chemical-style label used in log messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fe => "Fe",
            Self::Si => "Si",
            Self::Ice => "Ice",
            Self::He3 => "He3",
            Self::C => "C",
        }
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// A structure that can be built at a colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum BuildingKind {
    /// Solar array, +25 kW.
    Solar,
    /// Fusion reactor, +100 kW.
    Reactor,
    /// Mining drill, draws 10 kW and drives resource accrual.
    Drill,
    /// Refinery, draws 15 kW and doubles drill output.
    Refinery,
    /// Foundry, draws 20 kW and is required to construct ships.
    Foundry,
    /// Habitat module, draws 5 kW.
    Habitat,
}

impl BuildingKind {
    /// All building kinds in display order.
    pub const ALL: [Self; 6] = [
        Self::Solar,
        Self::Reactor,
        Self::Drill,
        Self::Refinery,
        Self::Foundry,
        Self::Habitat,
    ];

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Solar => "Solar Array",
            Self::Reactor => "Reactor",
            Self::Drill => "Drill",
            Self::Refinery => "Refinery",
            Self::Foundry => "Foundry",
            Self::Habitat => "Habitat",
        }
    }
}

impl core::fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Ships
// ---------------------------------------------------------------------------

/// The role of a spacecraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ShipType {
    /// Surveys unknown worlds on arrival.
    Probe,
    /// Carries cargo between colonies.
    Hauler,
    /// Founds a colony on a surveyed world.
    Seeder,
}

impl ShipType {
    /// All ship types in display order.
    pub const ALL: [Self; 3] = [Self::Probe, Self::Hauler, Self::Seeder];

    /// Human-readable name, also the prefix of generated ship names.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Probe => "Probe",
            Self::Hauler => "Hauler",
            Self::Seeder => "Seeder",
        }
    }
}

impl core::fmt::Display for ShipType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Survey
// ---------------------------------------------------------------------------

/// Discovery/ownership stage of a world.
///
/// The derived ordering matches the only legal direction of travel:
/// `Unknown < Surveyed < Colony`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum SurveyStatus {
    /// Nothing is known about the world yet.
    #[default]
    Unknown,
    /// A probe has visited and catalogued the world.
    Surveyed,
    /// A colony has been founded on the world.
    Colony,
}

impl core::fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Surveyed => "surveyed",
            Self::Colony => "colony",
        })
    }
}

// ---------------------------------------------------------------------------
// Time control
// ---------------------------------------------------------------------------

/// Player-selected scheduler speed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum TickSpeed {
    /// No ticks fire.
    #[default]
    Paused,
    /// One tick per base interval.
    Normal,
    /// Three ticks per base interval.
    Fast,
    /// Ten ticks per base interval.
    Fastest,
}

impl TickSpeed {
    /// Return the speed for an allowed multiplier (0, 1, 3, 10).
    pub const fn from_multiplier(multiplier: u32) -> Option<Self> {
        match multiplier {
            0 => Some(Self::Paused),
            1 => Some(Self::Normal),
            3 => Some(Self::Fast),
            10 => Some(Self::Fastest),
            _ => None,
        }
    }

    /// The multiplier applied to the base tick rate.
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::Paused => 0,
            Self::Normal => 1,
            Self::Fast => 3,
            Self::Fastest => 10,
        }
    }

    /// Whether the scheduler should fire ticks at this speed.
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }
}

impl core::fmt::Display for TickSpeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_paused() {
            f.write_str("paused")
        } else {
            write!(f, "{}x", self.multiplier())
        }
    }
}
