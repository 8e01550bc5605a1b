//! Project configuration (`aura.toml`)
//!
//! Optional per-workspace overrides for scan exclusions, thresholds, and
//! the assistant binary. A missing file means defaults; a malformed one is
//! warned about and ignored.
//!
//! ```toml
//! # aura.toml
//!
//! [scan]
//! exclude = ["generated", "fixtures"]
//!
//! [bloat]
//! top_n = 10
//! max_size_mb = 25.0
//!
//! [activity]
//! window_hours = 8.0
//! idle_threshold_minutes = 20.0
//!
//! [advisor]
//! enabled = true
//! binary = "copilot"
//! ```

use crate::activity::{DEFAULT_IDLE_THRESHOLD_MINUTES, DEFAULT_WINDOW_HOURS};
use crate::scanners::bloat::{DEFAULT_MAX_SIZE_MB, DEFAULT_TOP_N};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "aura.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuraConfig {
    pub scan: ScanConfig,
    pub bloat: BloatConfig,
    pub activity: ActivityConfig,
    pub advisor: AdvisorConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extra directory names to prune, on top of the built-in set.
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BloatConfig {
    pub top_n: usize,
    pub max_size_mb: f64,
}

impl Default for BloatConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            max_size_mb: DEFAULT_MAX_SIZE_MB,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    pub window_hours: f64,
    pub idle_threshold_minutes: f64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            idle_threshold_minutes: DEFAULT_IDLE_THRESHOLD_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub enabled: bool,
    pub binary: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            binary: "copilot".to_string(),
        }
    }
}

impl AuraConfig {
    /// Load from `<root>/aura.toml`; defaults when absent or malformed.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!("no {} found, using defaults", CONFIG_FILE);
                return Self::default();
            }
        };
        match toml::from_str(&raw) {
            Ok(config) => {
                debug!("loaded {}", path.display());
                config
            }
            Err(err) => {
                warn!("ignoring malformed {}: {}", CONFIG_FILE, err);
                Self::default()
            }
        }
    }
}
