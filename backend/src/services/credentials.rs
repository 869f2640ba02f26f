//! Credential verification
//!
//! Registers users with a bcrypt-hashed password and checks claimed
//! credentials against the stored hash. Token issuance is left to the
//! caller: a successful `register` or `verify` is followed by a call to
//! [`TokenService::issue`](crate::auth::TokenService::issue) in the route.

use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::repositories::{NewUser, StoreError, UserRecord, UserStore};
use sessiongate_shared::validation::validate_registration;
use sessiongate_shared::AuthError;
use std::sync::Arc;
use tracing::{debug, info};

/// Registers users and verifies their credentials
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    passwords: PasswordService,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>, passwords: PasswordService) -> Self {
        Self { store, passwords }
    }

    /// Register a new user
    ///
    /// The duplicate lookup runs before any hashing or writes. The store's
    /// own uniqueness check on insert still decides races between
    /// concurrent registrations.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, ApiError> {
        validate_registration(username, email, password).map_err(ApiError::Validation)?;

        if self
            .store
            .find_by_username_or_email(username, email)
            .await?
            .is_some()
        {
            debug!(username, "Registration rejected: user exists");
            return Err(AuthError::DuplicateUser.into());
        }

        let password_hash = self.passwords.hash_async(password.to_string()).await?;

        let user = self
            .store
            .insert(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict => ApiError::Auth(AuthError::DuplicateUser),
                other => ApiError::Store(other),
            })?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify a username and password
    ///
    /// An unknown username and a wrong password produce the same
    /// [`AuthError::InvalidCredentials`], and both pay for one bcrypt check.
    pub async fn verify(&self, username: &str, password: &str) -> Result<UserRecord, ApiError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            self.passwords.burn_verify_async(password.to_string()).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        debug!(user_id = %user.id, "Credentials verified");
        Ok(user)
    }
}
