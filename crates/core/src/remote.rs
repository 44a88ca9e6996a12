// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Sim Session Manager Contributors

//! Default simulation client against the simulator's HTTP bridge

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use sim_session_common::{Error, RemoteConfig, Result, ScriptType};

use crate::client::{SimHandle, SimulationClient};

/// Simulation client for the local HTTP bridge of the simulator
#[derive(Debug, Clone)]
pub struct RemoteSimClient {
    client: Client,
    base_url: String,
}

/// Response from the connect endpoint
#[derive(Debug, Deserialize)]
struct ConnectResponse {
    session: String,
}

/// Error response from the bridge API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Request body for script-function calls
#[derive(Debug, Serialize)]
struct ScriptCallRequest<'a> {
    function: &'a str,
    script_type: ScriptType,
    args: Value,
}

/// Response from the script-call endpoint
#[derive(Debug, Deserialize)]
struct ScriptCallResponse {
    result: Value,
}

impl RemoteSimClient {
    /// Create a client for the configured bridge endpoint
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Remote(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    /// Extract the error body of a failed response, with a fallback
    async fn error_text(response: reqwest::Response) -> String {
        let status = response.status();
        let error: ErrorResponse = response.json().await.unwrap_or_else(|_| ErrorResponse {
            error: format!("bridge returned status {}", status),
        });
        error.error
    }
}

#[async_trait]
impl SimulationClient for RemoteSimClient {
    async fn connect(&self) -> Result<SimHandle> {
        let url = format!("{}/api/session", self.base_url);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::Remote(format!("failed to reach simulation bridge: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Remote(Self::error_text(response).await));
        }

        let connect: ConnectResponse = response
            .json()
            .await
            .map_err(|e| Error::Remote(format!("failed to parse connect response: {}", e)))?;

        debug!("Connected to simulation bridge, session {}", connect.session);
        Ok(SimHandle::new(connect.session))
    }

    async fn start_simulation(&self, handle: &SimHandle) -> Result<()> {
        let url = format!("{}/api/session/{}/start", self.base_url, handle.id());
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::Remote(format!("failed to send start request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Remote(Self::error_text(response).await))
        }
    }

    async fn stop_simulation(&self, handle: &SimHandle) -> Result<()> {
        let url = format!("{}/api/session/{}/stop", self.base_url, handle.id());
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::Remote(format!("failed to send stop request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Remote(Self::error_text(response).await))
        }
    }

    async fn set_string_signal(&self, handle: &SimHandle, name: &str, value: &str) -> Result<()> {
        let url = format!(
            "{}/api/session/{}/signals/{}",
            self.base_url,
            handle.id(),
            name
        );
        let response = self
            .client
            .put(&url)
            .json(&serde_json::json!({ "value": value }))
            .send()
            .await
            .map_err(|e| Error::Remote(format!("failed to set signal {}: {}", name, e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Remote(Self::error_text(response).await))
        }
    }

    async fn call_script_function(
        &self,
        handle: &SimHandle,
        function: &str,
        script_type: ScriptType,
        args: Value,
    ) -> Result<Value> {
        let url = format!("{}/api/session/{}/call", self.base_url, handle.id());
        let response = self
            .client
            .post(&url)
            .json(&ScriptCallRequest {
                function,
                script_type,
                args,
            })
            .send()
            .await
            .map_err(|e| Error::Remote(format!("failed to call {}: {}", function, e)))?;

        if !response.status().is_success() {
            return Err(Error::Remote(Self::error_text(response).await));
        }

        let call: ScriptCallResponse = response
            .json()
            .await
            .map_err(|e| Error::Remote(format!("failed to parse call response: {}", e)))?;

        debug!("Script call {} returned {:?}", function, call.result);
        Ok(call.result)
    }

    async fn disconnect(&self, handle: &SimHandle) -> Result<()> {
        let url = format!("{}/api/session/{}", self.base_url, handle.id());
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Error::Remote(format!("failed to send disconnect request: {}", e)))?;

        // A session the bridge no longer knows about is already gone
        if response.status().is_success() || response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(Error::Remote(Self::error_text(response).await))
        }
    }
}
