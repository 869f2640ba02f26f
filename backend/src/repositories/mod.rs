//! User store abstraction
//!
//! The credential service only ever needs three operations from storage:
//! a lookup by username or email, a lookup by username, and an insert.
//! Uniqueness of usernames and emails is enforced by the store itself;
//! callers treat [`StoreError::Conflict`] from `insert` as authoritative.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod user;

pub use memory::InMemoryUserStore;
pub use user::PgUserStore;

/// Stored user record
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// Keep hashes out of logs
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input for creating a user
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Username or email already taken")]
    Conflict,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// External collaborator holding user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find any user whose username or email matches
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Persist a new user, failing with [`StoreError::Conflict`] on a taken
    /// username or email
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Check the store is reachable
    async fn health_check(&self) -> Result<(), StoreError>;
}
