//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the
//! pipeline may run.
//!
//! ## Optional Variables
//!
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `HUNTER_SCAN_TARGET` - Default crawl target (default: 100000)
//! - `HUNTER_TICK_INTERVAL_MS` - Delay between scheduler chunks (default: 100)
//! - `HUNTER_EVENT_QUEUE_CAPACITY` - Progress event buffer (default: 1024, min: 16)
//! - `HUNTER_SNAPSHOT_PATH` - Snapshot file (default: `hunter_snapshot.json`)
//! - `HUNTER_EXPORT_DIR` - Directory for CSV exports (default: `.`)
//!
//! ## Simulation Rates
//!
//! Each a probability in `[0, 1]`:
//!
//! - `HUNTER_ARCHIVE_HIT_RATE` - archived-history gate pass rate (default: 0.4)
//! - `HUNTER_AVAILABILITY_RATE` - availability gate pass rate (default: 0.2)
//! - `HUNTER_SUGGESTION_RATE` - chance of using a suggested fragment (default: 0.3)
//! - `HUNTER_INDEXED_RATE` - chance a candidate is indexed (default: 0.7)
//! - `HUNTER_WAYBACK_CLEAN_RATE` - chance of a clean archive history (default: 0.8)
//! - `HUNTER_AUCTION_RATE` - chance an auction-capable listing is live (default: 0.5)
//!
//! ## Identity
//!
//! `HUNTER_OPERATOR` / `HUNTER_LICENSE_KEY` are read by the identity
//! provider, not here.

use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;

/// Probabilities driving the simulated providers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub archive_hit_rate: f64,
    pub availability_rate: f64,
    pub suggestion_rate: f64,
    pub indexed_rate: f64,
    pub wayback_clean_rate: f64,
    pub auction_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            archive_hit_rate: 0.4,
            availability_rate: 0.2,
            suggestion_rate: 0.3,
            indexed_rate: 0.7,
            wayback_clean_rate: 0.8,
            auction_rate: 0.5,
        }
    }
}

impl SimulationConfig {
    fn validate(&self) -> Result<()> {
        let rates = [
            ("HUNTER_ARCHIVE_HIT_RATE", self.archive_hit_rate),
            ("HUNTER_AVAILABILITY_RATE", self.availability_rate),
            ("HUNTER_SUGGESTION_RATE", self.suggestion_rate),
            ("HUNTER_INDEXED_RATE", self.indexed_rate),
            ("HUNTER_WAYBACK_CLEAN_RATE", self.wayback_clean_rate),
            ("HUNTER_AUCTION_RATE", self.auction_rate),
        ];

        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                bail!("{name} must be between 0 and 1, got {rate}");
            }
        }

        Ok(())
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: String,
    /// Default crawl target offered by the CLI.
    pub default_scan_target: usize,
    /// Delay between scheduler chunks in milliseconds.
    pub tick_interval_ms: u64,
    /// Capacity of the progress event channel.
    pub event_queue_capacity: usize,
    pub snapshot_path: PathBuf,
    pub export_dir: PathBuf,
    pub simulation: SimulationConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a value fails to parse or a simulation rate is
    /// out of range.
    pub fn from_env() -> Result<Self> {
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let default_scan_target = env::var("HUNTER_SCAN_TARGET")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100_000);

        let tick_interval_ms = env::var("HUNTER_TICK_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let event_queue_capacity: usize = env::var("HUNTER_EVENT_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let snapshot_path = env::var("HUNTER_SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("hunter_snapshot.json"));

        let export_dir = env::var("HUNTER_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let simulation = SimulationConfig {
            archive_hit_rate: Self::load_rate("HUNTER_ARCHIVE_HIT_RATE", 0.4)?,
            availability_rate: Self::load_rate("HUNTER_AVAILABILITY_RATE", 0.2)?,
            suggestion_rate: Self::load_rate("HUNTER_SUGGESTION_RATE", 0.3)?,
            indexed_rate: Self::load_rate("HUNTER_INDEXED_RATE", 0.7)?,
            wayback_clean_rate: Self::load_rate("HUNTER_WAYBACK_CLEAN_RATE", 0.8)?,
            auction_rate: Self::load_rate("HUNTER_AUCTION_RATE", 0.5)?,
        };

        let config = Self {
            log_level,
            log_format,
            default_scan_target: default_scan_target.max(1),
            tick_interval_ms: tick_interval_ms.max(1),
            event_queue_capacity: event_queue_capacity.max(16),
            snapshot_path,
            export_dir,
            simulation,
        };

        config.simulation.validate()?;

        Ok(config)
    }

    fn load_rate(name: &str, default: f64) -> Result<f64> {
        match env::var(name) {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("{name} must be a number, got {raw:?}")),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_scan_target: 100_000,
            tick_interval_ms: 100,
            event_queue_capacity: 1024,
            snapshot_path: PathBuf::from("hunter_snapshot.json"),
            export_dir: PathBuf::from("."),
            simulation: SimulationConfig::default(),
        }
    }
}
