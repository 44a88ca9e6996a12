// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Sim Session Manager Contributors

// Sim Session Manager - CLI Client
// Interactive presentation shell around the session controller

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::{Input, Password, Select};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

use sim_session_common::{AppConfig, Severity};
use sim_session_core::{AuthService, CredentialStore, RemoteSimClient, SessionController};

#[derive(Parser)]
#[command(name = "sim-session")]
#[command(about = "Session console for a remote robotics simulation", long_about = None)]
#[command(version)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sim_session=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Sim Session Manager starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = CredentialStore::new(&config.credentials_path);
    let auth = AuthService::new(store);
    auth.ensure_store()
        .context("Failed to initialize the credential store")?;

    let client =
        RemoteSimClient::new(&config.remote).context("Failed to create the simulation client")?;
    let mut controller = SessionController::new(auth, Arc::new(client), config.simulation.clone());

    println!("{}", "Welcome to the simulation session console!".bold());

    loop {
        let choice = Select::new()
            .with_prompt("Main menu")
            .items(&["Log in", "Register", "Exit"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let (username, password) = prompt_credentials()?;
                let logged_in = controller.login(&username, password.as_str()).is_ok();
                print_status(&controller);
                if logged_in {
                    simulation_menu(&mut controller).await?;
                }
            }
            1 => {
                let (username, password) = prompt_credentials()?;
                let _ = controller.register(&username, password.as_str());
                print_status(&controller);
            }
            _ => break,
        }
    }

    info!("Shutting down");
    controller.shutdown().await;

    Ok(())
}

/// Prompt for a username and a hidden, zeroized password
fn prompt_credentials() -> Result<(String, Zeroizing<String>)> {
    let username: String = Input::new()
        .with_prompt("Username")
        .allow_empty(true)
        .interact_text()?;

    // Empty input is passed through; the controller rejects it
    let password = Zeroizing::new(
        Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?,
    );

    Ok((username, password))
}

/// Simulation lifecycle menu, available after a successful login
async fn simulation_menu(controller: &mut SessionController) -> Result<()> {
    loop {
        let choice = Select::new()
            .with_prompt("Simulation")
            .items(&["Start simulation", "Stop simulation", "Save map", "Back"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let _ = controller.start().await;
            }
            1 => {
                let _ = controller.stop().await;
            }
            2 => {
                let _ = controller.save_map();
            }
            _ => return Ok(()),
        }

        print_status(controller);
    }
}

/// Render the status slot after a controller call
fn print_status(controller: &SessionController) {
    let status = controller.current_status();
    if status.is_empty() {
        return;
    }

    match status.severity {
        Severity::Info => println!("{}", status.text.green()),
        Severity::Error => println!("{}", status.text.red()),
    }
}
