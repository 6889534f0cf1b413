//! Monitor configuration

use serde::{Deserialize, Serialize};

/// Slow-query monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Commands taking at least this many milliseconds are reported
    #[serde(default = "default_slow_threshold_ms")]
    pub slow_threshold_ms: u64,
}

fn default_slow_threshold_ms() -> u64 {
    100
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            slow_threshold_ms: default_slow_threshold_ms(),
        }
    }
}
