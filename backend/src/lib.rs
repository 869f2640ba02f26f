//! Sessiongate Backend Library
//!
//! Credential verification and stateless session tokens behind a small
//! HTTP API. Modules are exposed for the binary and integration tests.

pub mod auth;
pub mod config;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
