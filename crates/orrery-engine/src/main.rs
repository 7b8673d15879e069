//! Headless engine binary for the Orrery simulation.
//!
//! Wires configuration, logging, the engine, speed control and the
//! autopilot commander together and runs the day loop until a bound is
//! reached or the process receives Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `orrery-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Restore the saved game, or start a new one in the Sol system
//! 4. Create speed control from clock and run bounds
//! 5. Install the Ctrl-C stop handler
//! 6. Run the simulation loop with the autopilot
//! 7. Save the game and log the result

mod autopilot;
mod error;

use std::path::Path;
use std::sync::Arc;

use orrery_core::config::{LoggingConfig, RulesConfig};
use orrery_core::runner;
use orrery_core::{Engine, SimulationConfig, SpeedControl};
use orrery_world::Catalog;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::autopilot::Autopilot;
use crate::error::EngineError;

/// Configuration file, relative to the working directory.
const CONFIG_PATH: &str = "orrery-config.yaml";

/// Application entry point for the headless engine.
///
/// # Errors
///
/// Returns an error if any initialization step, the run, or the final
/// save fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config = SimulationConfig::load_or_default(Path::new(CONFIG_PATH))?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        base_tick_interval_ms = config.clock.base_tick_interval_ms,
        initial_speed = config.clock.initial_speed,
        max_days = config.simulation.max_days,
        "orrery-engine starting"
    );

    // 3. Restore or create the game.
    let snapshot_path = config.persistence.snapshot_path.as_deref();
    let engine = load_engine(snapshot_path, &config.rules)?;
    info!(
        day = engine.day(),
        colonies = engine.colonies().len(),
        ships = engine.fleet().len(),
        "Engine ready"
    );
    let engine = Mutex::new(engine);

    // 4. Create speed control.
    let control = Arc::new(SpeedControl::new(
        config.clock.base_tick_interval_ms,
        config.clock.tick_speed()?,
        &config.simulation,
    ));

    // 5. Stop cleanly on Ctrl-C.
    {
        let control = Arc::clone(&control);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, stopping after the current day");
                    control.request_stop();
                }
                Err(err) => warn!(error = %err, "Failed to listen for Ctrl-C"),
            }
        });
    }

    // 6. Run the simulation.
    let mut autopilot = Autopilot::new();
    let result = runner::run_simulation(&engine, &control, &mut autopilot).await?;
    runner::log_simulation_end(&result);

    // 7. Save and report.
    let engine = engine.into_inner();
    if let Some(path) = snapshot_path {
        save_engine(&engine, path)?;
    }
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        day = engine.day(),
        colonies = engine.colonies().len(),
        actions_accepted = autopilot.accepted(),
        actions_rejected = autopilot.rejected(),
        "orrery-engine shutdown complete"
    );

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Restore from `path` when it names an existing file, otherwise start a
/// new game.
fn load_engine(path: Option<&Path>, rules: &RulesConfig) -> Result<Engine, EngineError> {
    let Some(path) = path.filter(|p| p.exists()) else {
        info!("No saved game found, starting in Sol");
        return Ok(Engine::sol(rules)?);
    };
    let contents = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&contents).map_err(|source| EngineError::SnapshotFile {
        path: path.to_path_buf(),
        source,
    })?;
    let engine = Engine::restore(Catalog::sol()?, value)?;
    info!(path = %path.display(), day = engine.day(), "Saved game restored");
    Ok(engine)
}

/// Write the engine's snapshot to `path` as pretty-printed JSON.
fn save_engine(engine: &Engine, path: &Path) -> Result<(), EngineError> {
    let value = engine.snapshot()?;
    let text = serde_json::to_string_pretty(&value).map_err(|source| {
        EngineError::SnapshotFile {
            path: path.to_path_buf(),
            source,
        }
    })?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, text)?;
    info!(path = %path.display(), day = engine.day(), "Game saved");
    Ok(())
}
