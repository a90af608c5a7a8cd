//! Domain service for authentication and account management.

use thiserror::Error;

use crate::db::{Account, CreateOutcome, NewAccount};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Deliberately the same for an unknown username and a wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account {0} not found")]
    NotFound(i32),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<Account, AuthError>;

    /// Looks up the account behind a session.
    async fn account(&self, id: i32) -> Result<Option<Account>, AuthError>;

    /// All accounts ordered by display name.
    async fn list_accounts(&self) -> Result<Vec<Account>, AuthError>;

    /// Creates an account after trimming and validating the input.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for an empty username or display name
    /// or a password below the configured minimum length.
    async fn create_account(&self, account: NewAccount) -> Result<CreateOutcome, AuthError>;

    /// Deletes an account and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] when `requester` targets itself.
    async fn delete_account(&self, requester: &Account, id: i32) -> Result<Account, AuthError>;
}
