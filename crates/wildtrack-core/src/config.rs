//! Process-wide configuration, resolved once at startup and immutable after.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

fn default_output_dir() -> String {
    "events".to_string()
}

fn default_poll_interval() -> u32 {
    60
}

fn default_id() -> String {
    "unset".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Opaque identifier stamped into every event. Placeholder values keep
    /// the detector running but downstream rejects the events.
    #[serde(default = "default_id")]
    pub run_id: String,

    #[serde(default = "default_id")]
    pub player_id: String,

    /// Directory the event sink writes into.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Frames between detection passes.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u32,

    /// Seconds before the scheduler auto-stops; 0 = unlimited.
    #[serde(default)]
    pub max_runtime: u64,

    /// Verbose logging.
    #[serde(default)]
    pub debug: bool,

    /// Explicit title/region override, e.g. `"emerald-us"`. Absent means the
    /// default profile.
    #[serde(default)]
    pub memory_profile: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_id: default_id(),
            player_id: default_id(),
            output_dir: default_output_dir(),
            poll_interval: default_poll_interval(),
            max_runtime: 0,
            debug: false,
            memory_profile: None,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::ConfigParseError(e.to_string()))?;
        Ok(config)
    }

    /// Log configuration problems loudly. Nothing here is fatal: an operator
    /// can fix identifiers live while detection keeps running.
    pub fn validate(&self) {
        if self.run_id == default_id() {
            warn!("run_id is not set; all emitted events will be rejected downstream");
        }
        if self.player_id == default_id() {
            warn!("player_id is not set; all emitted events will be rejected downstream");
        }
        if self.poll_interval == 0 {
            warn!("poll_interval of 0 disables throttling; every frame runs a full pass");
        }
    }
}
