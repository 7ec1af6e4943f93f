//! JWT access tokens (HS256)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime used when the caller does not ask for a specific one
pub const DEFAULT_EXPIRE_MINUTES: i64 = 15;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Lifetime of tokens issued by the login endpoint
    pub access_token_expire_minutes: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, access_token_expire_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            access_token_expire_minutes,
        }
    }

    /// Config with a fresh random 256-bit secret. Tokens signed with it
    /// become invalid once the process exits.
    pub fn with_random_secret(access_token_expire_minutes: i64) -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::new(hex::encode(bytes), access_token_expire_minutes)
    }

    pub fn access_token_expires(&self) -> Result<Duration, TokenError> {
        Duration::try_minutes(self.access_token_expire_minutes).ok_or(TokenError::ExpiryOutOfRange)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Token has no subject")]
    MissingSubject,

    #[error("Token expiry is out of range")]
    ExpiryOutOfRange,
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

impl TokenClaims {
    pub fn new(subject: &str, expires_in: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(expires_in)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        Ok(Self {
            sub: Some(subject.to_string()),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

/// Sign a token for `subject`. Without `expires_in` the token lives
/// [`DEFAULT_EXPIRE_MINUTES`].
pub fn create_access_token(
    subject: &str,
    expires_in: Option<Duration>,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    let expires_in = expires_in.unwrap_or_else(|| Duration::minutes(DEFAULT_EXPIRE_MINUTES));
    let claims = TokenClaims::new(subject, expires_in)?;

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(token)
}

/// Check signature and expiry, return the subject.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<String, TokenError> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    match token_data.claims.sub {
        Some(sub) if !sub.is_empty() => Ok(sub),
        _ => Err(TokenError::MissingSubject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret", 30)
    }

    fn decode_claims(token: &str, config: &JwtConfig) -> TokenClaims {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap()
        .claims
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = config();
        let token = create_access_token("johndoe", None, &config).unwrap();
        assert_eq!(verify_token(&token, &config).unwrap(), "johndoe");
    }

    #[test]
    fn test_default_lifetime_is_fifteen_minutes() {
        let config = config();
        let token = create_access_token("johndoe", None, &config).unwrap();
        let claims = decode_claims(&token, &config);
        assert_eq!(claims.exp - claims.iat, DEFAULT_EXPIRE_MINUTES * 60);
    }

    #[test]
    fn test_explicit_lifetime() {
        let config = config();
        let token =
            create_access_token("johndoe", Some(config.access_token_expires().unwrap()), &config)
                .unwrap();
        let claims = decode_claims(&token, &config);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = config();
        let token = create_access_token("johndoe", Some(Duration::minutes(-10)), &config).unwrap();
        assert!(matches!(
            verify_token(&token, &config),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_access_token("johndoe", None, &config()).unwrap();
        let other = JwtConfig::new("another-secret", 30);
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let config = config();
        let claims = TokenClaims {
            sub: None,
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
            iat: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(TokenError::MissingSubject)
        ));
    }

    #[test]
    fn test_unrepresentable_lifetime_is_an_error() {
        let config = JwtConfig::new("test-secret", 10_000_000_000_000);
        let expires = config.access_token_expires().unwrap();
        assert!(matches!(
            create_access_token("johndoe", Some(expires), &config),
            Err(TokenError::ExpiryOutOfRange)
        ));

        let config = JwtConfig::new("test-secret", i64::MAX);
        assert!(matches!(
            config.access_token_expires(),
            Err(TokenError::ExpiryOutOfRange)
        ));
    }

    #[test]
    fn test_invalid_token() {
        assert!(verify_token("invalid-token", &config()).is_err());
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = JwtConfig::with_random_secret(30);
        let b = JwtConfig::with_random_secret(30);
        assert_eq!(a.secret.len(), 64);
        assert_ne!(a.secret, b.secret);
    }
}
