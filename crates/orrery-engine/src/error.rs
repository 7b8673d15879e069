//! Error types for the headless engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup, the run itself, and
//! the shutdown save, so `main` can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: orrery_core::ConfigError,
    },

    /// The world catalog failed validation.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: orrery_world::WorldError,
    },

    /// The scheduler loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: orrery_core::RunnerError,
    },

    /// A snapshot could not be captured or restored.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// The underlying snapshot error.
        #[from]
        source: orrery_core::SnapshotError,
    },

    /// The snapshot file could not be parsed or rendered as JSON.
    #[error("snapshot file {}: {source}", path.display())]
    SnapshotFile {
        /// File that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Reading or writing the snapshot file failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
