use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// What happens to the per-road vehicle tallies once a cycle's allocation has
/// consumed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TallyResetPolicy {
    /// Clear every tally after it feeds an allocation, so each cycle reflects
    /// only the demand seen since the previous one.
    EveryCycle,
    /// Never clear; tallies accumulate for the lifetime of the controller and
    /// allocations track long-term density trends.
    Retain,
}

/// Controller configuration, fixed at startup and never reloaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Number of road approaches at the intersection.
    pub num_roads: usize,
    /// Total green seconds distributed across the roads each cycle.
    pub green_pool_secs: u32,
    /// Minimum green seconds any road receives in a demand-driven cycle.
    pub min_green_secs: u32,
    /// Maximum green seconds any road may receive.
    pub max_green_secs: u32,
    /// Yellow warning duration before each green phase.
    pub yellow_secs: u32,
    /// Presence window: a reading strictly inside (min, max) cm is a vehicle.
    pub detection_min_cm: f64,
    pub detection_max_cm: f64,
    /// Minimum gap between two counted detections on the same road.
    pub debounce_ms: u64,
    /// Sensor polling granularity inside each scheduler second.
    pub sub_tick_ms: u64,
    /// Display refresh cadence; anything at or under 1000 ms only smooths the
    /// perceived countdown, which always moves in whole seconds.
    pub display_refresh_ms: u64,
    /// TM1637-style brightness level, 0..7.
    pub display_brightness: u8,
    /// All-red sampling window before the first cycle, so the opening
    /// allocation is demand-driven.
    pub startup_sample_ms: u64,
    /// All-red hold at the start of every cycle.
    pub all_red_settle_ms: u64,
    /// All-red gap between two consecutive road turns.
    pub turn_gap_ms: u64,
    pub tally_reset: TallyResetPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            num_roads: 4,
            green_pool_secs: 60,
            min_green_secs: 10,
            max_green_secs: 40,
            yellow_secs: 2,
            detection_min_cm: 2.0,
            detection_max_cm: 7.0,
            debounce_ms: 300,
            sub_tick_ms: 50,
            display_refresh_ms: 100,
            display_brightness: 6,
            startup_sample_ms: 3000,
            all_red_settle_ms: 1000,
            turn_gap_ms: 500,
            tally_reset: TallyResetPolicy::EveryCycle,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ControllerConfig {
    /// Loads and validates a JSON config file. Missing fields fall back to
    /// the defaults above.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: ControllerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_roads == 0 {
            return Err(ConfigError::Invalid("num_roads must be at least 1".into()));
        }
        if self.num_roads > 26 {
            return Err(ConfigError::Invalid(
                "num_roads above 26 exhausts the letter naming scheme".into(),
            ));
        }
        if self.green_pool_secs == 0 {
            return Err(ConfigError::Invalid("green_pool_secs must be positive".into()));
        }
        if self.min_green_secs > self.max_green_secs {
            return Err(ConfigError::Invalid(format!(
                "min_green_secs {} exceeds max_green_secs {}",
                self.min_green_secs, self.max_green_secs
            )));
        }
        if self.sub_tick_ms == 0 || self.sub_tick_ms > 1000 {
            return Err(ConfigError::Invalid(
                "sub_tick_ms must be in 1..=1000".into(),
            ));
        }
        if !(self.detection_min_cm < self.detection_max_cm) {
            return Err(ConfigError::Invalid(
                "detection window must satisfy min < max".into(),
            ));
        }
        if self.display_brightness > 7 {
            return Err(ConfigError::Invalid(
                "display_brightness must be in 0..=7".into(),
            ));
        }
        Ok(())
    }
}
