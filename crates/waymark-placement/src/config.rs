use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use waymark_pattern::Handedness;
use waymark_world::ScanConfig;

// Top-level waymark.toml
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct WaymarkConfig {
    pub placement: PlacementConfig,
    pub terrain: ScanConfig,
    pub resolver: ResolverConfig,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Cells the player must move before the next placement.
    pub distance_threshold: f64,
    pub normal_tick_ms: u64,
    /// Cadence while a descent is ahead.
    pub fast_tick_ms: u64,
    /// Cells beyond the placement position probed for ground.
    pub lookahead: i32,
    pub preview_distance: i32,
    pub allow_carving: bool,
    pub preview_enabled: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 0.6,
            normal_tick_ms: 100,
            fast_tick_ms: 50,
            lookahead: 1,
            preview_distance: 2,
            allow_carving: true,
            preview_enabled: true,
        }
    }
}

impl PlacementConfig {
    pub fn normal_tick(&self) -> Duration {
        Duration::from_millis(self.normal_tick_ms)
    }

    pub fn fast_tick(&self) -> Duration {
        Duration::from_millis(self.fast_tick_ms)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverConfig {
    pub handedness: Handedness,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config read failed: {}", e),
            ConfigError::Parse(e) => write!(f, "config parse failed: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl WaymarkConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: WaymarkConfig = toml::from_str(text)?;
        cfg.check()?;
        Ok(cfg)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let p = &self.placement;
        if !(p.distance_threshold.is_finite() && p.distance_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "placement.distance_threshold must be >= 0 (got {})",
                p.distance_threshold
            )));
        }
        if p.normal_tick_ms == 0 || p.fast_tick_ms == 0 {
            return Err(ConfigError::Invalid("tick intervals must be non-zero".into()));
        }
        if p.lookahead < 1 {
            return Err(ConfigError::Invalid(format!(
                "placement.lookahead must be >= 1 (got {})",
                p.lookahead
            )));
        }
        if self.terrain.scan_max_depth < 0 || self.terrain.scan_start_offset < 0 {
            return Err(ConfigError::Invalid("terrain scan bounds must be >= 0".into()));
        }
        Ok(())
    }
}
