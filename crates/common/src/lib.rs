// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Sim Session Manager Contributors

// Sim Session Manager - Common Library
// Shared types, error taxonomy, and configuration structures

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, RemoteConfig, SimulationConfig};
pub use error::{Error, Result};
pub use types::{ScriptType, Severity, SimState, StatusMessage};

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
