//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the user store and external systems.

pub mod credentials;
pub mod translate;

pub use credentials::CredentialService;
pub use translate::TranslationService;
