// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Sim Session Manager Contributors

// Sim Session Manager - Authentication Module
// Validates login and registration requests against the credential store

use tracing::{info, warn};

use sim_session_common::{Error, Result};

use crate::credentials::CredentialStore;

/// Validates credentials against the [`CredentialStore`].
///
/// Single attempt per call, unlimited retries: there is no lockout, rate
/// limiting, or session expiry. Passwords are compared by plain equality
/// against the stored clear-text value.
#[derive(Debug)]
pub struct AuthService {
    store: CredentialStore,
}

impl AuthService {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Create the backing file if it does not exist yet.
    ///
    /// Called once at startup; a storage failure here aborts
    /// initialization rather than starting with undefined state.
    pub fn ensure_store(&self) -> Result<()> {
        if !self.store.exists() {
            self.store.initialize_empty()?;
        }
        Ok(())
    }

    /// Register a new user
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        validate_fields(username, password)?;

        let mut users = self.store.load()?;

        if users.contains_key(username) {
            warn!("Registration rejected, user already exists: {}", username);
            return Err(Error::DuplicateUser(username.to_string()));
        }

        users.insert(username.to_string(), password.to_string());
        self.store.save(&users)?;

        info!("Registered user: {}", username);
        Ok(())
    }

    /// Validate a login attempt
    ///
    /// The caller is responsible for marking the session authenticated;
    /// this only checks the credentials.
    pub fn login(&self, username: &str, password: &str) -> Result<()> {
        validate_fields(username, password)?;

        let users = self.store.load()?;

        // Exact, case-sensitive match; do not reveal which field was wrong
        match users.get(username) {
            Some(stored) if stored == password => {
                info!("Login successful: {}", username);
                Ok(())
            }
            _ => {
                warn!("Login failed: {}", username);
                Err(Error::InvalidCredentials)
            }
        }
    }
}

fn validate_fields(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(Error::Validation(
            "username and password are required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> AuthService {
        let store = CredentialStore::new(dir.path().join("users.json"));
        let service = AuthService::new(store);
        service.ensure_store().unwrap();
        service
    }

    #[test]
    fn test_register_then_login() {
        let dir = TempDir::new().unwrap();
        let auth = service_in(&dir);

        auth.register("alice", "secret").unwrap();
        auth.login("alice", "secret").unwrap();
    }

    #[test]
    fn test_register_duplicate_fails() {
        let dir = TempDir::new().unwrap();
        let auth = service_in(&dir);

        auth.register("alice", "secret").unwrap();
        let err = auth.register("alice", "different").unwrap_err();
        assert!(matches!(err, Error::DuplicateUser(_)));
    }

    #[test]
    fn test_register_empty_fields_rejected() {
        let dir = TempDir::new().unwrap();
        let auth = service_in(&dir);

        assert!(matches!(
            auth.register("", "secret").unwrap_err(),
            Error::Validation(_)
        ));
        assert!(matches!(
            auth.register("alice", "").unwrap_err(),
            Error::Validation(_)
        ));

        // Nothing was persisted
        assert!(auth.store.load().unwrap().is_empty());
    }

    #[test]
    fn test_login_empty_fields_never_reach_store() {
        let dir = TempDir::new().unwrap();
        // No ensure_store: the backing file does not exist, so any store
        // access would surface Error::Storage instead of Validation
        let auth = AuthService::new(CredentialStore::new(dir.path().join("users.json")));

        let err = auth.login("", "secret").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = auth.login("alice", "").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_login_wrong_password() {
        let dir = TempDir::new().unwrap();
        let auth = service_in(&dir);

        auth.register("alice", "secret").unwrap();
        let err = auth.login("alice", "wrong").unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[test]
    fn test_login_unknown_user() {
        let dir = TempDir::new().unwrap();
        let auth = service_in(&dir);

        let err = auth.login("nobody", "secret").unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let auth = service_in(&dir);

        auth.register("Alice", "secret").unwrap();
        assert!(matches!(
            auth.login("alice", "secret").unwrap_err(),
            Error::InvalidCredentials
        ));
        auth.register("alice", "other").unwrap();
    }
}
