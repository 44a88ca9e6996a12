// Configuration structures for Sim Session Manager

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ScriptType;

/// Application configuration
///
/// Loaded from `<config_dir>/sim-session-manager/config.toml`. A missing
/// file yields the defaults; a present but malformed file is an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path of the credential file (flat JSON username -> password map)
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Remote simulation endpoint
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Simulation command behavior
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Remote simulation bridge endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Bridge host (the simulator runs alongside the operator's desktop)
    #[serde(default = "default_remote_host")]
    pub host: String,

    /// Bridge port
    #[serde(default = "default_remote_port")]
    pub port: u16,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Behavior of the simulation lifecycle commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Signal a map save before stopping the simulation
    #[serde(default = "default_save_on_stop")]
    pub save_on_stop: bool,

    /// Grace period between the save signal and the stop call, in
    /// milliseconds. A pause, not a hand-off protocol: the remote side is
    /// never awaited for an acknowledgement.
    #[serde(default = "default_stop_grace_ms")]
    pub stop_grace_ms: u64,

    /// Upper bound on the background map-save call, in seconds
    #[serde(default = "default_save_timeout")]
    pub save_timeout_secs: u64,

    /// Destination path passed to the remote save function
    #[serde(default = "default_map_save_path")]
    pub map_save_path: String,

    /// Scene script function that performs the save
    #[serde(default = "default_save_function")]
    pub save_function: String,

    /// Script class the save function lives in
    #[serde(default = "default_save_script_type")]
    pub save_script_type: ScriptType,

    /// String signal that requests a save from the running scene
    #[serde(default = "default_save_signal")]
    pub save_signal: String,
}

// Default value functions

fn default_credentials_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("sim-session-manager").join("users.json"))
        .unwrap_or_else(|| PathBuf::from("users.json"))
}

fn default_remote_host() -> String {
    "127.0.0.1".to_string()
}

fn default_remote_port() -> u16 {
    23050
}

fn default_request_timeout() -> u64 {
    30
}

fn default_save_on_stop() -> bool {
    true
}

fn default_stop_grace_ms() -> u64 {
    1000
}

fn default_save_timeout() -> u64 {
    30
}

fn default_map_save_path() -> String {
    "map.bmp".to_string()
}

fn default_save_function() -> String {
    "saveMap@PioneerP3DX".to_string()
}

fn default_save_script_type() -> ScriptType {
    ScriptType::Child
}

fn default_save_signal() -> String {
    "saveMapCommand".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            remote: RemoteConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: default_remote_host(),
            port: default_remote_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            save_on_stop: default_save_on_stop(),
            stop_grace_ms: default_stop_grace_ms(),
            save_timeout_secs: default_save_timeout(),
            map_save_path: default_map_save_path(),
            save_function: default_save_function(),
            save_script_type: default_save_script_type(),
            save_signal: default_save_signal(),
        }
    }
}

impl RemoteConfig {
    /// Base URL of the simulation bridge API
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            // Return default config if file doesn't exist
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(&config_path).context("Failed to read configuration file")?;

        let config: Self =
            toml::from_str(&contents).context("Failed to parse configuration file")?;

        Ok(config)
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("sim-session-manager").join("config.toml"))
    }
}
