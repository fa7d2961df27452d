//! Registration, sign-in and sign-out on top of an external auth provider.

use std::sync::Arc;

use async_trait::async_trait;
use closet_sdk::models::Session;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::error::DomainError;
use super::fields::ClosetFields;
use super::session::SessionHub;

pub const FIELDS_REQUIRED: &str = "All fields are required.";
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const USERNAME_REQUIRED: &str = "Please enter a username.";

/// Identity backend. Errors are reported to the user as-is.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Sign-in methods registered for `email`; empty if the address is unknown.
    async fn sign_in_methods(&self, email: &str) -> anyhow::Result<Vec<String>>;

    async fn create_user(
        &self,
        email: &str,
        password: &SecretString,
        display_name: &str,
    ) -> anyhow::Result<Session>;

    async fn sign_in(&self, email: &str, password: &SecretString) -> anyhow::Result<Session>;

    async fn sign_out(&self, user_id: Uuid) -> anyhow::Result<()>;

    async fn username_taken(&self, username: &str) -> anyhow::Result<bool>;
}

#[derive(Debug)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegistrationForm {
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
        }
    }

    /// # Errors
    /// Returns `DomainError::Validation` with the first failing rule.
    pub fn validate(&self) -> Result<(), DomainError> {
        let password = self.password.expose_secret();
        let confirm = self.confirm_password.expose_secret();
        if self.full_name.trim().is_empty()
            || self.email.trim().is_empty()
            || password.is_empty()
            || confirm.is_empty()
        {
            return Err(DomainError::validation(ClosetFields::FULL_NAME, FIELDS_REQUIRED));
        }
        if password != confirm {
            return Err(DomainError::validation(ClosetFields::PASSWORD, PASSWORDS_MISMATCH));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(DomainError::validation(ClosetFields::EMAIL, INVALID_EMAIL));
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

pub struct AccountService {
    auth: Arc<dyn AuthProvider>,
    sessions: SessionHub,
}

impl AccountService {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthProvider>, sessions: SessionHub) -> Self {
        Self { auth, sessions }
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionHub {
        &self.sessions
    }

    /// Create the account and sign it in.
    ///
    /// # Errors
    /// - `DomainError::Validation` if the form is incomplete or inconsistent.
    /// - `DomainError::EmailInUse` if the address already has an account.
    /// - `DomainError::Auth` if the provider refuses.
    #[instrument(skip_all)]
    pub async fn register(&self, form: RegistrationForm) -> Result<Session, DomainError> {
        form.validate()?;
        let email = form.email.trim();

        let methods = self
            .auth
            .sign_in_methods(email)
            .await
            .map_err(|e| DomainError::auth(e.to_string()))?;
        if !methods.is_empty() {
            debug!(?methods, "email already registered");
            return Err(DomainError::EmailInUse);
        }

        let session = self
            .auth
            .create_user(email, &form.password, form.full_name.trim())
            .await
            .map_err(|e| {
                warn!(error = %e, "account creation failed");
                DomainError::auth(e.to_string())
            })?;
        info!(user_id = %session.user_id(), "account registered");
        self.sessions.publish(Some(session.clone()));
        Ok(session)
    }

    /// # Errors
    /// Returns `DomainError::Auth` with the provider's message.
    #[instrument(skip_all)]
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, DomainError> {
        let session = self
            .auth
            .sign_in(email.trim(), password)
            .await
            .map_err(|e| DomainError::auth(e.to_string()))?;
        info!(user_id = %session.user_id(), "signed in");
        self.sessions.publish(Some(session.clone()));
        Ok(session)
    }

    /// Sign the current user out. Signing out while signed out is a no-op.
    ///
    /// # Errors
    /// Returns `DomainError::Auth` if the provider fails; the session is kept.
    pub async fn sign_out(&self) -> Result<(), DomainError> {
        let Some(session) = self.sessions.current() else {
            return Ok(());
        };
        self.auth
            .sign_out(session.user_id())
            .await
            .map_err(|e| DomainError::auth(e.to_string()))?;
        info!(user_id = %session.user_id(), "signed out");
        self.sessions.publish(None);
        Ok(())
    }

    /// # Errors
    /// - `DomainError::Validation` for a blank username.
    /// - `DomainError::Auth` if the provider lookup fails.
    pub async fn is_username_available(&self, username: &str) -> Result<bool, DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::validation(ClosetFields::USERNAME, USERNAME_REQUIRED));
        }
        let taken = self
            .auth
            .username_taken(username)
            .await
            .map_err(|e| DomainError::auth(e.to_string()))?;
        Ok(!taken)
    }
}
