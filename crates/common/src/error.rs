// Error types for Sim Session Manager

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("user already exists: {0}")]
    DuplicateUser(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("not connected")]
    NotConnected,

    #[error("credential store error: {0}")]
    Storage(String),

    #[error("remote simulation error: {0}")]
    Remote(String),
}

impl Error {
    /// True for errors the operator can fix by resubmitting input or
    /// retrying the command; storage failures are surfaced as-is.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
