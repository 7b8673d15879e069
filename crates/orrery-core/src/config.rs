//! Configuration loading and typed config structures for the Orrery engine.
//!
//! The canonical configuration lives in `orrery-config.yaml` at the project
//! root. Every field has a serde default, so an empty file (or no file at
//! all, see [`SimulationConfig::load_or_default`]) yields a playable setup.

use std::path::{Path, PathBuf};

use orrery_types::TickSpeed;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "ORRERY_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// `clock.initial_speed` is not one of 0, 1, 3 or 10.
    #[error("unsupported initial speed {0}x (allowed: 0, 1, 3, 10)")]
    InvalidSpeed(u32),

    /// `clock.base_tick_interval_ms` must be positive.
    #[error("base tick interval must be greater than zero")]
    ZeroInterval,
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `orrery-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scheduler timing.
    #[serde(default)]
    pub clock: ClockConfig,

    /// Run bounds.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Game rule parameters.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where the headless engine resumes from and saves to.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `ORRERY_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error from [`SimulationConfig::validate`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config
            .logging
            .apply_level_override(std::env::var(LOG_LEVEL_ENV).ok());
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults (still
    /// honouring `ORRERY_LOG_LEVEL`).
    ///
    /// # Errors
    ///
    /// Same as [`SimulationConfig::from_file`] for a file that exists.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config
            .logging
            .apply_level_override(std::env::var(LOG_LEVEL_ENV).ok());
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSpeed`] or
    /// [`ConfigError::ZeroInterval`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.base_tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        self.clock.tick_speed().map(|_| ())
    }
}

/// Scheduler timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Milliseconds between ticks at 1x.
    #[serde(default = "default_base_tick_interval_ms")]
    pub base_tick_interval_ms: u64,

    /// Speed multiplier at startup (0, 1, 3 or 10).
    #[serde(default = "default_initial_speed")]
    pub initial_speed: u32,
}

impl ClockConfig {
    /// The configured initial speed as a [`TickSpeed`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSpeed`] for unsupported multipliers.
    pub fn tick_speed(&self) -> Result<TickSpeed, ConfigError> {
        TickSpeed::from_multiplier(self.initial_speed)
            .ok_or(ConfigError::InvalidSpeed(self.initial_speed))
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            base_tick_interval_ms: default_base_tick_interval_ms(),
            initial_speed: default_initial_speed(),
        }
    }
}

/// Run bounds. Zero means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Stop once this many days have elapsed.
    #[serde(default = "default_max_days")]
    pub max_days: u64,

    /// Stop after this many wall-clock seconds.
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            max_real_time_seconds: 0,
        }
    }
}

/// Game rule parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Maximum action log entries retained.
    #[serde(default = "default_action_log_capacity")]
    pub action_log_capacity: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            action_log_capacity: default_action_log_capacity(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Replace the level with `value` if it is set and non-empty.
    pub fn apply_level_override(&mut self, value: Option<String>) {
        if let Some(level) = value.filter(|v| !v.trim().is_empty()) {
            self.level = level;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Snapshot file location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Snapshot file read at startup (if present) and written on shutdown.
    /// `None` runs a fresh, unsaved game.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_base_tick_interval_ms() -> u64 {
    1_000
}

const fn default_initial_speed() -> u32 {
    1
}

const fn default_max_days() -> u64 {
    365
}

const fn default_action_log_capacity() -> usize {
    200
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = SimulationConfig::default();
        assert_eq!(config.clock.base_tick_interval_ms, 1_000);
        assert_eq!(config.clock.initial_speed, 1);
        assert_eq!(config.simulation.max_days, 365);
        assert_eq!(config.simulation.max_real_time_seconds, 0);
        assert_eq!(config.rules.action_log_capacity, 200);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.persistence.snapshot_path.is_none());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
clock:
  base_tick_interval_ms: 250
  initial_speed: 3

simulation:
  max_days: 90
  max_real_time_seconds: 60

rules:
  action_log_capacity: 50

logging:
  level: "debug"
  json: true

persistence:
  snapshot_path: "saves/orrery.json"
"#;

        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.clock.base_tick_interval_ms, 250);
        assert_eq!(config.clock.tick_speed().ok(), Some(TickSpeed::Fast));
        assert_eq!(config.simulation.max_days, 90);
        assert_eq!(config.rules.action_log_capacity, 50);
        assert!(config.logging.json);
        assert_eq!(
            config.persistence.snapshot_path,
            Some(PathBuf::from("saves/orrery.json"))
        );
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SimulationConfig::parse("simulation:\n  max_days: 7\n");
        let config = config.ok().unwrap_or_default();

        // Overridden
        assert_eq!(config.simulation.max_days, 7);
        // Defaults
        assert_eq!(config.clock.base_tick_interval_ms, 1_000);
        assert_eq!(config.rules.action_log_capacity, 200);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(SimulationConfig::parse("").is_ok());
    }

    #[test]
    fn unsupported_speed_is_rejected() {
        let result = SimulationConfig::parse("clock:\n  initial_speed: 2\n");
        assert!(matches!(result, Err(ConfigError::InvalidSpeed(2))));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = SimulationConfig::parse("clock:\n  base_tick_interval_ms: 0\n");
        assert!(matches!(result, Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let result = SimulationConfig::parse("clock: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn level_override_ignores_blank_values() {
        let mut logging = LoggingConfig::default();
        logging.apply_level_override(Some("  ".to_owned()));
        assert_eq!(logging.level, "info");
        logging.apply_level_override(None);
        assert_eq!(logging.level, "info");
        logging.apply_level_override(Some("trace".to_owned()));
        assert_eq!(logging.level, "trace");
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("orrery-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
