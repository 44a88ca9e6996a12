// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Sim Session Manager Contributors

//! Session state machine and simulation lifecycle controller
//!
//! One [`Session`] exists per process, owned by the controller. All
//! lifecycle commands are gated behind a successful login, and every
//! outcome (success or failure) is written to the status slot for the
//! presentation layer to render.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use sim_session_common::{Error, Result, SimState, SimulationConfig, StatusMessage};

use crate::auth::AuthService;
use crate::client::{SimHandle, SimulationClient};
use crate::status::StatusSink;

/// Value written to the save signal to request a map save
const SAVE_SIGNAL_VALUE: &str = "save";

/// Per-process record of authentication and simulation-handle state
///
/// Invariant: `handle` is present iff `state` is not `Disconnected`.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: Option<String>,
    pub authenticated: bool,
    pub handle: Option<SimHandle>,
    pub state: SimState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            username: None,
            authenticated: false,
            handle: None,
            state: SimState::Disconnected,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Sequences login, registration, and simulation lifecycle commands.
///
/// The presentation layer serializes user actions into single calls, so
/// the session is only ever mutated from one call site at a time. The
/// map save is the one command dispatched onto a background task; its
/// completion message may overwrite the status of a later command
/// (last write wins).
pub struct SessionController {
    auth: AuthService,
    client: Arc<dyn SimulationClient>,
    settings: SimulationConfig,
    session: Session,
    status: StatusSink,
}

impl SessionController {
    pub fn new(
        auth: AuthService,
        client: Arc<dyn SimulationClient>,
        settings: SimulationConfig,
    ) -> Self {
        Self {
            auth,
            client,
            settings,
            session: Session::new(),
            status: StatusSink::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The last reported status message, empty at startup
    pub fn current_status(&self) -> StatusMessage {
        self.status.current()
    }

    /// Register a new user. Never authenticates the session.
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        match self.auth.register(username, password) {
            Ok(()) => {
                self.status.info("registration successful");
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Authenticate the session
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        match self.auth.login(username, password) {
            Ok(()) => {
                self.session.username = Some(username.to_string());
                self.session.authenticated = true;
                self.status.info(format!("welcome, {}", username));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Start the simulation, connecting first if no handle exists yet
    pub async fn start(&mut self) -> Result<()> {
        self.require_auth()?;

        let handle = match self.session.handle.clone() {
            Some(handle) => handle,
            None => {
                debug!("No simulation handle yet, connecting");
                match self.client.connect().await {
                    Ok(handle) => {
                        info!("Connected to simulation ({})", handle);
                        self.session.handle = Some(handle.clone());
                        self.session.state = SimState::Connected;
                        handle
                    }
                    Err(e) => {
                        error!("Failed to connect to simulation: {}", e);
                        return Err(self.fail(e));
                    }
                }
            }
        };

        match self.client.start_simulation(&handle).await {
            Ok(()) => {
                self.session.state = SimState::Running;
                info!("Simulation started");
                self.status.info("simulation started");
                Ok(())
            }
            Err(e) => {
                // Discard the handle so the next attempt reconnects from scratch
                error!("Failed to start simulation: {}", e);
                self.session.handle = None;
                self.session.state = SimState::Disconnected;
                Err(self.fail(e))
            }
        }
    }

    /// Stop the simulation, optionally signalling a map save first
    pub async fn stop(&mut self) -> Result<()> {
        self.require_auth()?;

        let handle = match self.session.handle.clone() {
            Some(handle) => handle,
            None => {
                warn!("Stop requested without an active connection");
                return Err(self.fail(Error::NotConnected));
            }
        };

        if self.settings.save_on_stop {
            if let Err(e) = self
                .client
                .set_string_signal(&handle, &self.settings.save_signal, SAVE_SIGNAL_VALUE)
                .await
            {
                error!("Failed to signal map save before stop: {}", e);
                return Err(self.fail(e));
            }
            self.status.info("saving map before stop");

            // Grace period for the scene to act on the signal; a pause,
            // not a hand-off protocol
            tokio::time::sleep(Duration::from_millis(self.settings.stop_grace_ms)).await;
        }

        match self.client.stop_simulation(&handle).await {
            Ok(()) => {
                self.session.state = SimState::Stopped;
                info!("Simulation stopped");
                self.status.info("simulation stopped");
                Ok(())
            }
            Err(e) => {
                error!("Failed to stop simulation: {}", e);
                Err(self.fail(e))
            }
        }
    }

    /// Request a map save from the running scene.
    ///
    /// The remote call runs on a background task so a slow save never
    /// blocks the interactive surface. Fire and forget: no cancellation
    /// and no join; completion is only visible as a later overwrite of
    /// the status slot.
    pub fn save_map(&self) -> Result<()> {
        self.require_auth()?;

        let handle = match self.session.handle.clone() {
            Some(handle) => handle,
            None => {
                warn!("Map save requested without an active connection");
                return Err(self.fail(Error::NotConnected));
            }
        };

        let client = Arc::clone(&self.client);
        let status = self.status.clone();
        let function = self.settings.save_function.clone();
        let script_type = self.settings.save_script_type;
        let path = self.settings.map_save_path.clone();
        let deadline = Duration::from_secs(self.settings.save_timeout_secs);

        self.status.info("map save requested");

        tokio::spawn(async move {
            let args = json!({ "path": path.as_str() });
            let call = client.call_script_function(&handle, &function, script_type, args);
            match timeout(deadline, call).await {
                Ok(Ok(result)) => {
                    debug!("Map save returned {:?}", result);
                    status.info(format!("map saved to {}", path));
                }
                Ok(Err(e)) => {
                    error!("Map save failed: {}", e);
                    status.error(format!("map save failed: {}", e));
                }
                Err(_) => {
                    error!("Map save timed out after {:?}", deadline);
                    status.error("map save timed out");
                }
            }
        });

        Ok(())
    }

    /// Process-exit teardown: disconnect the handle if one is open
    pub async fn shutdown(&mut self) {
        if let Some(handle) = self.session.handle.take() {
            info!("Disconnecting simulation session {}", handle);
            if let Err(e) = self.client.disconnect(&handle).await {
                warn!("Failed to disconnect cleanly: {}", e);
            }
        }
        self.session.state = SimState::Disconnected;
    }

    fn require_auth(&self) -> Result<()> {
        if self.session.authenticated {
            Ok(())
        } else {
            warn!("Rejected simulation command before login");
            Err(self.fail(Error::NotAuthenticated))
        }
    }

    /// Convert a domain error into the status slot, then hand it back
    fn fail(&self, err: Error) -> Error {
        self.status.error(err.to_string());
        err
    }
}
