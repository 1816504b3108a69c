use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_client::AgentTimeouts;

/// Service address used when the config does not name one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_EPOCHS: u32 = 10;
const DEFAULT_BATCH_SIZE: u32 = 32;
const DEFAULT_PROGRESS_TICK_MS: u64 = 500;
const MIN_PROGRESS_TICK_MS: u64 = 50;
const MAX_PROGRESS_TICK_MS: u64 = 5_000;

/// Settings persisted to `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Where the classification service lives.
    #[serde(default)]
    pub server: ServerSettings,
    /// Training form defaults and simulation pacing.
    #[serde(default)]
    pub training: TrainingSettings,
}

impl AppSettings {
    /// Replace out-of-range or empty values with usable ones.
    pub fn normalized(mut self) -> Self {
        let base_url = self.server.base_url.trim();
        self.server.base_url = if base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            base_url.to_string()
        };
        if self.server.connect_timeout_secs == 0 {
            self.server.connect_timeout_secs = DEFAULT_CONNECT_TIMEOUT_SECS;
        }
        if self.server.read_timeout_secs == Some(0) {
            self.server.read_timeout_secs = None;
        }
        self.training.progress_tick_ms = self
            .training
            .progress_tick_ms
            .clamp(MIN_PROGRESS_TICK_MS, MAX_PROGRESS_TICK_MS);
        self
    }
}

/// Connection settings for the classification service.
///
/// Config keys: `base_url`, `connect_timeout_secs`, `read_timeout_secs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL that `/upload` and `/api/train` are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Seconds allowed to establish a connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Seconds allowed between reads; unset waits for the server indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_secs: Option<u64>,
}

impl ServerSettings {
    /// Agent timeouts derived from these settings.
    pub fn timeouts(&self) -> AgentTimeouts {
        AgentTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            read: self.read_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: None,
        }
    }
}

/// Last used training form values and simulated progress pacing.
///
/// Config keys: `dataset_path`, `epochs`, `batch_size`, `progress_tick_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSettings {
    #[serde(default)]
    pub dataset_path: String,
    #[serde(default = "default_epochs")]
    pub epochs: u32,
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Period of the simulated progress timer in milliseconds.
    #[serde(default = "default_progress_tick_ms")]
    pub progress_tick_ms: u64,
}

impl TrainingSettings {
    /// Timer period for the progress simulation.
    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            dataset_path: String::new(),
            epochs: DEFAULT_EPOCHS,
            batch_size: DEFAULT_BATCH_SIZE,
            progress_tick_ms: DEFAULT_PROGRESS_TICK_MS,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_epochs() -> u32 {
    DEFAULT_EPOCHS
}

fn default_batch_size() -> u32 {
    DEFAULT_BATCH_SIZE
}

fn default_progress_tick_ms() -> u64 {
    DEFAULT_PROGRESS_TICK_MS
}
