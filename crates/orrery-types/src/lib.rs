//! Shared type definitions for the Orrery simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Orrery workspace. Read-model types flow downstream to `TypeScript` via
//! `ts-rs` for the UI layer.
//!
//! # Modules
//!
//! - [`ids`] -- [`WorldId`] catalog slugs and UUID-backed [`ShipId`]s
//! - [`enums`] -- Closed kinds (resources, buildings, ships, survey, speed)
//! - [`structs`] -- Entity structs (worlds, colonies, ships, log entries)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{BuildingKind, ResourceKind, ShipType, SurveyStatus, TickSpeed};
pub use ids::{ShipId, WorldId};
pub use structs::{Colony, LogEntry, Ship, Stockpile, Voyage, World};
