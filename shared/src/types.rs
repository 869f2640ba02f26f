//! Request and response types for the Sessiongate HTTP API

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token response returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Claims carried inside a session token
///
/// `iat` and `exp` are Unix timestamps in seconds. `jti` is random per
/// issuance, so two tokens minted for the same user never coincide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub id: String,
    /// Username at mint time
    pub username: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Token ID
    pub jti: String,
}

/// Response for the protected dashboard resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomepageResponse {
    pub message: String,
    pub user: SessionClaims,
}

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(rename = "textTotranslate", alias = "text")]
    pub text_to_translate: String,
}

/// Translation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}
