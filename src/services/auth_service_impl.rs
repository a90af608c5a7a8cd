//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::{Account, CreateOutcome, NewAccount, Store};
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
    min_password_length: usize,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig, min_password_length: usize) -> Self {
        Self {
            store,
            security,
            min_password_length,
        }
    }

    fn validate(&self, account: NewAccount) -> Result<NewAccount, AuthError> {
        let username = account.username.trim().to_string();
        let display_name = account.display_name.trim().to_string();

        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }

        if display_name.is_empty() {
            return Err(AuthError::Validation("Full name is required".to_string()));
        }

        if account.password.chars().count() < self.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }

        Ok(NewAccount {
            username,
            display_name,
            ..account
        })
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        self.store
            .verify_credentials(username.trim(), password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn account(&self, id: i32) -> Result<Option<Account>, AuthError> {
        Ok(self.store.get_account(id).await?)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AuthError> {
        Ok(self.store.list_accounts().await?)
    }

    async fn create_account(&self, account: NewAccount) -> Result<CreateOutcome, AuthError> {
        let account = self.validate(account)?;
        let username = account.username.clone();

        let outcome = self.store.create_account(account, &self.security).await?;

        match &outcome {
            CreateOutcome::Created(created) => {
                tracing::info!(
                    username = %created.username,
                    is_admin = created.is_admin,
                    "Account created"
                );
            }
            CreateOutcome::DuplicateUsername => {
                tracing::warn!(username = %username, "Account not created, username already taken");
            }
        }

        Ok(outcome)
    }

    async fn delete_account(&self, requester: &Account, id: i32) -> Result<Account, AuthError> {
        if requester.id == id {
            return Err(AuthError::Forbidden(
                "You cannot delete your own account.".to_string(),
            ));
        }

        let target = self
            .store
            .get_account(id)
            .await?
            .ok_or(AuthError::NotFound(id))?;

        if !self.store.delete_account(id).await? {
            return Err(AuthError::NotFound(id));
        }

        tracing::info!(username = %target.username, by = %requester.username, "Account deleted");

        Ok(target)
    }
}
