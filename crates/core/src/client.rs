// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Sim Session Manager Contributors

//! Capability boundary for the remote simulation service
//!
//! The controller only ever talks to the simulator through this trait;
//! the default implementation lives in [`crate::remote`], and tests
//! substitute their own.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use sim_session_common::{Result, ScriptType};

/// Opaque reference to an established remote simulation connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimHandle {
    session: String,
}

impl SimHandle {
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.session
    }
}

impl fmt::Display for SimHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.session)
    }
}

/// Client boundary for the remote simulation service
///
/// Every call may fail with `Error::Remote`. The connection is
/// established lazily via [`connect`](SimulationClient::connect) on first
/// use and the returned handle is reused across subsequent commands
/// within the same session.
#[async_trait]
pub trait SimulationClient: Send + Sync {
    /// Establish a connection and return its handle
    async fn connect(&self) -> Result<SimHandle>;

    /// Start the simulation
    async fn start_simulation(&self, handle: &SimHandle) -> Result<()>;

    /// Stop the simulation
    async fn stop_simulation(&self, handle: &SimHandle) -> Result<()>;

    /// Set a string signal in the running scene
    async fn set_string_signal(&self, handle: &SimHandle, name: &str, value: &str) -> Result<()>;

    /// Call a scene script function and return its result
    async fn call_script_function(
        &self,
        handle: &SimHandle,
        function: &str,
        script_type: ScriptType,
        args: Value,
    ) -> Result<Value>;

    /// Tear down the connection
    async fn disconnect(&self, handle: &SimHandle) -> Result<()>;
}
