//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything here is built once at startup and read-only afterwards; the
//! signing secret in particular is never swapped while the process runs.

use crate::auth::{Clock, PasswordService, SystemClock, TokenService};
use crate::config::AppConfig;
use crate::repositories::UserStore;
use crate::services::{CredentialService, TranslationService};
use anyhow::Result;
use std::sync::Arc;

/// Shared application state
///
/// All fields are `Arc`-backed, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// User store
    pub store: Arc<dyn UserStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issuer/validator with cached keys
    pub tokens: TokenService,
    /// Registration and credential checks
    pub credentials: CredentialService,
    /// Translation upstream client
    pub translator: TranslationService,
}

impl AppState {
    /// Create application state on the wall clock
    pub fn new(store: Arc<dyn UserStore>, config: AppConfig) -> Result<Self> {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Create application state with an explicit time source
    pub fn with_clock(
        store: Arc<dyn UserStore>,
        config: AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let tokens =
            TokenService::with_clock(&config.jwt.secret, config.jwt.token_expiry_secs, clock);
        let passwords = PasswordService::new(config.password.bcrypt_cost)?;
        let credentials = CredentialService::new(store.clone(), passwords);
        let translator = TranslationService::new(config.translate.clone())?;

        Ok(Self {
            store,
            config: Arc::new(config),
            tokens,
            credentials,
            translator,
        })
    }

    /// Get a reference to the user store
    #[inline]
    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the token service
    #[inline]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    #[inline]
    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }

    #[inline]
    pub fn translator(&self) -> &TranslationService {
        &self.translator
    }
}
