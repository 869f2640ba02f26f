//! Configuration management for the Sessiongate backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: SG__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Lowest bcrypt work factor the service will accept
pub const MIN_BCRYPT_COST: u32 = 10;

/// Highest work factor bcrypt supports
pub const MAX_BCRYPT_COST: u32 = 31;

/// Longest session lifetime accepted (ten years)
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 10 * 365 * 86_400;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
///
/// Without a URL the service keeps users in process memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry_secs: i64,
}

/// Password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

/// Generative-language translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub target_language: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            target_language: "yoruba".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
            },
            jwt: JwtConfig {
                secret: "development-secret-change-in-production".to_string(),
                token_expiry_secs: 3600, // 1 hour
            },
            password: PasswordConfig {
                bcrypt_cost: MIN_BCRYPT_COST,
            },
            translate: TranslateConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with SG__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., SG__JWT__SECRET=... sets jwt.secret
            .add_source(config::Environment::with_prefix("SG").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would weaken credential handling
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.password.bcrypt_cost) {
            anyhow::bail!(
                "password.bcrypt_cost must be between {} and {}, got {}",
                MIN_BCRYPT_COST,
                MAX_BCRYPT_COST,
                self.password.bcrypt_cost
            );
        }
        if !(1..=MAX_TOKEN_EXPIRY_SECS).contains(&self.jwt.token_expiry_secs) {
            anyhow::bail!(
                "jwt.token_expiry_secs must be between 1 and {}, got {}",
                MAX_TOKEN_EXPIRY_SECS,
                self.jwt.token_expiry_secs
            );
        }
        if self.jwt.secret.is_empty() {
            anyhow::bail!("jwt.secret must not be empty");
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
