//! Colony economics, fleet movement, and the day tick cycle for the Orrery
//! simulation.
//!
//! The [`Engine`] owns a static [`Catalog`](orrery_world::Catalog) and a
//! [`GameState`]. Player actions mutate the state synchronously; the
//! [`runner`] advances it one day at a time under a [`SpeedControl`].
//!
//! # Modules
//!
//! - [`action`] -- Player commands and their outcomes.
//! - [`arrival`] -- The explicit pass that applies voyage effects once.
//! - [`clock`] -- Monotonic day counter.
//! - [`colony`] -- Colony store keyed by world.
//! - [`config`] -- Configuration loading from `orrery-config.yaml`.
//! - [`economy`] -- Build, construct-ship, and load-cargo rules.
//! - [`engine`] -- The engine facade and its read model.
//! - [`error`] -- Action errors and their categories.
//! - [`fleet`] -- Fleet registry.
//! - [`hint`] -- Next-step suggestions.
//! - [`log`] -- Bounded action log.
//! - [`movement`] -- Launch eligibility, launching, and per-day travel.
//! - [`production`] -- Power balance and resource accrual.
//! - [`runner`] -- The async tick loop.
//! - [`snapshot`] -- Whole-state capture and validated restore.
//! - [`speed`] -- Shared tick speed and run bounds.
//! - [`state`] -- The serializable game state aggregate.
//! - [`stockpile`] -- Checked stockpile arithmetic.
//! - [`tick`] -- The four-phase day cycle.

pub mod action;
pub mod arrival;
pub mod clock;
pub mod colony;
pub mod config;
pub mod economy;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod hint;
pub mod log;
pub mod movement;
pub mod production;
pub mod runner;
pub mod snapshot;
pub mod speed;
pub mod state;
pub mod stockpile;
pub mod tick;

pub use action::{Action, ActionOutcome};
pub use arrival::{ArrivalEffect, ArrivalReport};
pub use config::{ConfigError, SimulationConfig};
pub use engine::Engine;
pub use error::{ActionError, ActionErrorKind};
pub use hint::Hint;
pub use production::{PowerReport, ProductionOutcome};
pub use runner::{
    NoOpCallback, RunnerError, SimulationEndReason, SimulationResult, TickCallback,
    run_simulation,
};
pub use snapshot::SnapshotError;
pub use speed::SpeedControl;
pub use state::GameState;
pub use tick::{TickError, TickSummary};
