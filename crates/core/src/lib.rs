// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Sim Session Manager Contributors

//! Presentation-agnostic core for Sim Session Manager
//!
//! This crate contains the credential store, the auth service, the
//! simulation client boundary, and the session lifecycle controller.
//! Front ends call into [`SessionController`] and render the status
//! slot; they never touch the store or the client directly.

pub mod auth;
pub mod client;
pub mod credentials;
pub mod remote;
pub mod session;
pub mod status;

pub use auth::AuthService;
pub use client::{SimHandle, SimulationClient};
pub use credentials::CredentialStore;
pub use remote::RemoteSimClient;
pub use session::{Session, SessionController};
pub use status::StatusSink;

// Re-export types from common crate for convenience
pub use sim_session_common::{
    AppConfig, Error, RemoteConfig, Result, ScriptType, Severity, SimState, SimulationConfig,
    StatusMessage,
};
