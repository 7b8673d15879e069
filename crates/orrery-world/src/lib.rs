//! Catalog, survey, and blueprint data for the Orrery simulation.
//!
//! This crate models the static side of the solar system and the one piece
//! of world-level progress state: which bodies have been surveyed or
//! colonized.
//!
//! # Modules
//!
//! - [`catalog`] -- The validated, immutable [`Catalog`] of worlds, with
//!   moon-to-parent order resolution and voyage-length estimation.
//! - [`survey`] -- The forward-only [`SurveyLedger`].
//! - [`blueprint`] -- Building/ship costs, power figures, ship speeds and
//!   capacities, and the starter colonies.
//! - [`error`] -- Error types for catalog and survey operations.

pub mod blueprint;
pub mod catalog;
pub mod error;
pub mod survey;

// Re-export primary types at crate root.
pub use blueprint::{BuildingBlueprint, HOME_WORLD, ShipBlueprint};
pub use catalog::Catalog;
pub use error::WorldError;
pub use survey::SurveyLedger;
