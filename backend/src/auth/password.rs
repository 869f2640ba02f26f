//! Password hashing using bcrypt
//!
//! Provides salted password hashing and verification.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. The async variants move the work
//! onto the blocking thread pool so request handlers never stall the runtime.

use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use anyhow::Result;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Plaintext behind the placeholder hash used for unknown users
const DUMMY_PASSWORD: &str = "sessiongate-placeholder-password";

/// Password hashing service
///
/// Each hash gets a fresh random salt from bcrypt. The work factor is fixed
/// per service instance.
#[derive(Clone)]
pub struct PasswordService {
    cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl PasswordService {
    /// Create a hasher with the given bcrypt work factor
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            anyhow::bail!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_BCRYPT_COST,
                MAX_BCRYPT_COST,
                cost
            );
        }
        Ok(Self {
            cost,
            dummy_hash: Arc::new(OnceCell::new()),
        })
    }

    /// Configured work factor
    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Spend one verification's worth of work against a placeholder hash
    ///
    /// Called when no user matched, so a lookup miss costs about as much as
    /// a wrong password. The outcome is discarded.
    pub async fn burn_verify_async(&self, password: String) -> Result<()> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let hash = hasher
                .dummy_hash
                .get_or_try_init(|| hasher.hash(DUMMY_PASSWORD))?;
            let _ = Self::verify(&password, hash)?;
            Ok(())
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
