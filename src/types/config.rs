//! Configuration structures for the trip replay engine
//!
//! This module contains the replay configuration structure and validation
//! logic that control the simulation clock and playback sampling, plus the
//! CLI argument and configuration-file plumbing used to assemble it.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Reference constants for the replay cycle
///
/// These are defaults only; every value is overridable via the config file
/// or CLI, and the core components read them from [`ReplayConfig`] rather
/// than from these constants.
pub mod defaults {
    /// Length of the repeating real-time cycle in seconds (2 hours)
    pub const CYCLE_SECONDS: u32 = 7200;

    /// Spacing between recorded GPS samples in seconds
    pub const SAMPLE_CADENCE_SECONDS: u32 = 15;

    /// Start of the replayed historical window: 2013-07-01 08:00:00 UTC,
    /// a rich two-hour window at the beginning of the Porto dataset
    pub const REFERENCE_EPOCH: i64 = 1_372_665_600;

    /// Default path of the trips dataset (JSONL)
    pub const TRIPS_PATH: &str = "data/trips.jsonl";

    /// Default path of the drivers dataset (JSONL)
    pub const DRIVERS_PATH: &str = "data/drivers.jsonl";
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "porto-taxi-replay",
    version = "1.0.0",
    about = "Porto Taxi Replay - replays historical taxi trips as a live fleet",
    long_about = "Replays the Porto taxi telemetry dataset as if it were happening live, by \
mapping wall-clock time onto a fixed repeating two-hour window of recorded history.

EXAMPLES:
    # All trips active at the current simulated instant
    porto-taxi-replay --trips data/trips.jsonl --drivers data/drivers.jsonl

    # Active trips for one driver
    porto-taxi-replay --driver-id 20000589

    # Latest position only (reduced payload for polling)
    porto-taxi-replay --driver-id 20000589 --latest

    # A specific trip, whether or not it is currently active
    porto-taxi-replay --driver-id 20000589 --trip-id 1372636858620000589

    # Evaluate the snapshot at a fixed wall-clock instant
    porto-taxi-replay --at 2024-03-01T13:30:00Z

    # Generate a configuration template
    porto-taxi-replay --print-config > replay-config.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag, JSON format)
    3. Default values (lowest priority)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Path of the trips dataset
    #[arg(long, help = "Trips dataset path (JSONL or JSON array)")]
    pub trips: Option<String>,

    /// Path of the drivers dataset
    #[arg(long, help = "Drivers dataset path (JSONL or JSON array)")]
    pub drivers: Option<String>,

    /// Length of the repeating replay cycle in seconds
    #[arg(
        long,
        help = "Replay cycle length in seconds",
        long_help = "Length of the repeating real-time cycle in seconds. The cycle is anchored \
to odd-numbered UTC hours, so the default of 7200 (2 hours) tiles the clock exactly."
    )]
    pub cycle_seconds: Option<u32>,

    /// Spacing between recorded GPS samples in seconds
    #[arg(long, help = "GPS sample cadence in seconds")]
    pub sample_cadence_seconds: Option<u32>,

    /// Start of the replayed historical window (Unix epoch seconds)
    #[arg(
        long,
        help = "Reference epoch of the replayed window (Unix seconds)",
        long_help = "Unix epoch second at which the replayed historical window starts. The \
simulated instant is reference_epoch + seconds elapsed in the current cycle."
    )]
    pub reference_epoch: Option<i64>,

    /// Restrict queries to one driver
    #[arg(long, help = "Driver id to query")]
    pub driver_id: Option<u64>,

    /// Query a specific trip (requires --driver-id)
    #[arg(long, requires = "driver_id", help = "Trip id to query (requires --driver-id)")]
    pub trip_id: Option<u64>,

    /// Return only the current position (requires --driver-id)
    #[arg(
        long,
        requires = "driver_id",
        conflicts_with = "trip_id",
        help = "Return only the driver's current position (requires --driver-id)"
    )]
    pub latest: bool,

    /// List driver reference records instead of querying trips
    #[arg(long, help = "List driver reference records and exit")]
    pub list_drivers: bool,

    /// Evaluate at a fixed wall-clock instant instead of now
    #[arg(long, help = "Fixed wall-clock instant (RFC 3339) instead of now")]
    pub at: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without loading data
    #[arg(long, help = "Validate configuration without loading data")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Length of the repeating replay cycle in seconds
    pub cycle_seconds: Option<u32>,

    /// Spacing between recorded GPS samples in seconds
    pub sample_cadence_seconds: Option<u32>,

    /// Start of the replayed historical window (Unix epoch seconds)
    pub reference_epoch: Option<i64>,

    /// Path of the trips dataset
    pub trips_path: Option<String>,

    /// Path of the drivers dataset
    pub drivers_path: Option<String>,
}

/// Configuration for the trip replay engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Length of the repeating replay cycle in seconds
    pub cycle_seconds: u32,

    /// Spacing between recorded GPS samples in seconds
    pub sample_cadence_seconds: u32,

    /// Start of the replayed historical window (Unix epoch seconds)
    pub reference_epoch: i64,

    /// Path of the trips dataset
    pub trips_path: String,

    /// Path of the drivers dataset
    pub drivers_path: String,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for the replay configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Cycle length is invalid
    #[error("Cycle length must be greater than 0, got {0}")]
    InvalidCycleLength(u32),

    /// Sample cadence is invalid
    #[error("Sample cadence must be greater than 0, got {0}")]
    InvalidSampleCadence(u32),

    /// Sample cadence exceeds the cycle length
    #[error("Sample cadence ({cadence}) must not exceed the cycle length ({cycle})")]
    CadenceExceedsCycle {
        /// The configured cadence
        cadence: u32,
        /// The configured cycle length
        cycle: u32,
    },

    /// Reference epoch is invalid
    #[error("Reference epoch must be non-negative, got {0}")]
    InvalidReferenceEpoch(i64),

    /// A dataset path is empty
    #[error("Dataset path for {0} must not be empty")]
    EmptyDatasetPath(&'static str),
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            cycle_seconds: defaults::CYCLE_SECONDS,
            sample_cadence_seconds: defaults::SAMPLE_CADENCE_SECONDS,
            reference_epoch: defaults::REFERENCE_EPOCH,
            trips_path: defaults::TRIPS_PATH.to_string(),
            drivers_path: defaults::DRIVERS_PATH.to_string(),
        }
    }
}

impl ReplayConfig {
    /// Create configuration from parsed CLI arguments and optional config file
    pub fn from_cli_args(args: &CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let config_defaults = Self::default();

        Self {
            cycle_seconds: config_file.cycle_seconds.unwrap_or(config_defaults.cycle_seconds),
            sample_cadence_seconds: config_file
                .sample_cadence_seconds
                .unwrap_or(config_defaults.sample_cadence_seconds),
            reference_epoch: config_file
                .reference_epoch
                .unwrap_or(config_defaults.reference_epoch),
            trips_path: config_file.trips_path.unwrap_or(config_defaults.trips_path),
            drivers_path: config_file.drivers_path.unwrap_or(config_defaults.drivers_path),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: &CliArgs) {
        if let Some(value) = args.cycle_seconds {
            config.cycle_seconds = value;
        }
        if let Some(value) = args.sample_cadence_seconds {
            config.sample_cadence_seconds = value;
        }
        if let Some(value) = args.reference_epoch {
            config.reference_epoch = value;
        }
        if let Some(value) = &args.trips {
            config.trips_path = value.clone();
        }
        if let Some(value) = &args.drivers {
            config.drivers_path = value.clone();
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.cycle_seconds == 0 {
            return Err(ConfigValidationError::InvalidCycleLength(self.cycle_seconds));
        }

        if self.sample_cadence_seconds == 0 {
            return Err(ConfigValidationError::InvalidSampleCadence(self.sample_cadence_seconds));
        }

        if self.sample_cadence_seconds > self.cycle_seconds {
            return Err(ConfigValidationError::CadenceExceedsCycle {
                cadence: self.sample_cadence_seconds,
                cycle: self.cycle_seconds,
            });
        }

        if self.reference_epoch < 0 {
            return Err(ConfigValidationError::InvalidReferenceEpoch(self.reference_epoch));
        }

        if self.trips_path.is_empty() {
            return Err(ConfigValidationError::EmptyDatasetPath("trips"));
        }

        if self.drivers_path.is_empty() {
            return Err(ConfigValidationError::EmptyDatasetPath("drivers"));
        }

        Ok(())
    }

    /// End of the replayed window (exclusive): reference epoch plus one cycle
    pub fn reference_window_end(&self) -> i64 {
        self.reference_epoch + i64::from(self.cycle_seconds)
    }
}
