//! Session token issuance and validation
//!
//! Tokens are HS256 JWTs signed with a single process-wide secret. The
//! secret is handed in at construction and never rotated; there is no
//! revocation list, so a token stays usable until its `exp` passes.
//!
//! Expiry is checked against an injected [`Clock`] rather than by
//! `jsonwebtoken` itself, so an expired token is reported distinctly from a
//! forged one and tests can move time freely.

use super::clock::{Clock, SystemClock};
use anyhow::{anyhow, Result};
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sessiongate_shared::{AuthError, SessionClaims};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// Issues and validates session tokens
///
/// Cloning is cheap: keys and clock sit behind `Arc`.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    lifetime_secs: i64,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service backed by the wall clock
    pub fn new(secret: &str, token_expiry_secs: i64) -> Self {
        Self::with_clock(secret, token_expiry_secs, Arc::new(SystemClock))
    }

    /// Create a token service with an explicit time source
    pub fn with_clock(secret: &str, token_expiry_secs: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            lifetime_secs: token_expiry_secs,
            clock,
        }
    }

    /// Mint a token binding the subject's id and username
    ///
    /// Fails instead of wrapping when the lifetime pushes `exp` past the
    /// representable range.
    pub fn issue(&self, subject_id: Uuid, subject_name: &str) -> Result<String> {
        let now = self.clock.now();
        let exp = Duration::try_seconds(self.lifetime_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| anyhow!("Token lifetime of {}s overflows", self.lifetime_secs))?;

        let claims = SessionClaims {
            id: subject_id.to_string(),
            username: subject_name.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, self.keys.encoding())
            .map_err(|e| anyhow!("Failed to sign session token: {}", e))
    }

    /// Validate a presented token and return its claims
    ///
    /// `None` and empty strings count as no token at all.
    pub fn validate(&self, token: Option<&str>) -> Result<SessionClaims, AuthError> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::MissingToken),
        };

        let token_data = decode::<SessionClaims>(token, self.keys.decoding(), &self.validation())
            .map_err(|e| {
                debug!(kind = ?e.kind(), "Rejected session token");
                AuthError::InvalidToken
            })?;

        let claims = token_data.claims;
        if self.clock.now().timestamp() > claims.exp {
            debug!(exp = claims.exp, "Session token expired");
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn token_expiry_secs(&self) -> i64 {
        self.lifetime_secs
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is judged against `self.clock` in `validate`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    const SECRET: &str = "test-secret";

    fn fixed_service() -> (TokenService, FixedClock) {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        let service = TokenService::with_clock(SECRET, 3600, Arc::new(clock.clone()));
        (service, clock)
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let service = TokenService::new(SECRET, 3600);
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "ada").unwrap();
        let claims = service.validate(Some(&token)).unwrap();

        assert_eq!(claims.id, user_id.to_string());
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_same_subject_gets_distinct_tokens() {
        let (service, _clock) = fixed_service();
        let user_id = Uuid::new_v4();

        let first = service.issue(user_id, "ada").unwrap();
        let second = service.issue(user_id, "ada").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_missing_token() {
        let service = TokenService::new(SECRET, 3600);
        assert_eq!(service.validate(None), Err(AuthError::MissingToken));
        assert_eq!(service.validate(Some("")), Err(AuthError::MissingToken));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let service = TokenService::new(SECRET, 3600);
        assert_eq!(
            service.validate(Some("invalid.token.here")),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let service = TokenService::new(SECRET, 3600);
        let other = TokenService::new("another-secret", 3600);

        let token = other.issue(Uuid::new_v4(), "ada").unwrap();
        assert_eq!(service.validate(Some(&token)), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_unsigned_token_is_invalid() {
        let service = TokenService::new(SECRET, 3600);
        // {"alg":"none","typ":"JWT"}.{"id":"1","username":"ada","iat":0,"exp":99999999999,"jti":"x"}.
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                     eyJpZCI6IjEiLCJ1c2VybmFtZSI6ImFkYSIsImlhdCI6MCwiZXhwIjo5OTk5OTk5OTk5OSwianRpIjoieCJ9.";
        assert_eq!(service.validate(Some(token)), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_after_lifetime() {
        let (service, clock) = fixed_service();
        let token = service.issue(Uuid::new_v4(), "ada").unwrap();

        clock.advance(Duration::minutes(59));
        assert!(service.validate(Some(&token)).is_ok());

        clock.advance(Duration::minutes(2));
        assert_eq!(service.validate(Some(&token)), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn test_valid_through_exact_expiry_second() {
        let (service, clock) = fixed_service();
        let token = service.issue(Uuid::new_v4(), "ada").unwrap();

        clock.advance(Duration::seconds(3600));
        assert!(service.validate(Some(&token)).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(service.validate(Some(&token)), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn test_forged_token_reports_invalid_even_when_expired() {
        let (service, clock) = fixed_service();
        let other = TokenService::with_clock("another-secret", 3600, Arc::new(clock.clone()));
        let token = other.issue(Uuid::new_v4(), "ada").unwrap();

        clock.advance(Duration::hours(2));
        assert_eq!(service.validate(Some(&token)), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_unrepresentable_lifetime_fails_to_issue() {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()));

        for lifetime in [9_000_000_000_000, i64::MAX] {
            let service = TokenService::with_clock(SECRET, lifetime, clock.clone());
            assert!(service.issue(Uuid::new_v4(), "ada").is_err());
        }
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = TokenService::new(SECRET, 3600);
        let cloned = service.clone();
        assert_eq!(cloned.token_expiry_secs(), 3600);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_single_bit_flip_is_rejected(index in any::<prop::sample::Index>(), bit in 0u8..7) {
            let service = TokenService::new(SECRET, 3600);
            let token = service.issue(Uuid::new_v4(), "ada").unwrap();

            let mut bytes = token.into_bytes();
            let i = index.index(bytes.len());
            bytes[i] ^= 1 << bit;
            let tampered = String::from_utf8(bytes).unwrap();

            prop_assert_eq!(service.validate(Some(&tampered)), Err(AuthError::InvalidToken));
        }

        #[test]
        fn prop_round_trip_preserves_subject(name in "[a-zA-Z0-9_]{1,32}") {
            let service = TokenService::new(SECRET, 3600);
            let user_id = Uuid::new_v4();

            let token = service.issue(user_id, &name).unwrap();
            let claims = service.validate(Some(&token)).unwrap();

            prop_assert_eq!(claims.id, user_id.to_string());
            prop_assert_eq!(claims.username, name);
        }
    }
}
