/**
 * Session Tokens
 *
 * This module issues and authenticates the bearer tokens that identify a
 * user on protected routes. Tokens are HMAC-signed JWTs carrying the user's
 * login plus issue and expiry times; nothing is stored server-side.
 *
 * The signing secret is injected at construction. Only the HMAC family is
 * accepted when decoding, so a token whose header names any other algorithm
 * is rejected before its signature is looked at.
 */

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::config::AuthSettings;

/// Prefix of the `Authorization` header value
pub const BEARER_PREFIX: &str = "Bearer ";

/// Algorithm used when issuing tokens
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Algorithms accepted when authenticating tokens
pub const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Login of the authenticated user
    pub login: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Reasons a token cannot be issued or trusted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("authorization token must be present")]
    Missing,
    #[error("malformed authorization token: {0}")]
    Malformed(String),
    #[error("invalid authorization token")]
    InvalidSignature,
    #[error("unsupported token signing algorithm")]
    UnsupportedAlgorithm,
    #[error("authorization token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => Self::UnsupportedAlgorithm,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

/// Issues and authenticates signed session tokens
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<TokenKeys>,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;

        Self {
            keys: Arc::new(TokenKeys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
                ttl,
            }),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(settings.jwt_secret.as_bytes(), settings.token_ttl())
    }

    pub fn ttl(&self) -> Duration {
        self.keys.ttl
    }

    /// Create a token for `login`
    pub fn issue(&self, login: &str) -> Result<String, TokenError> {
        let now = unix_now();
        let exp = now
            .checked_add(self.keys.ttl.as_secs())
            .ok_or_else(|| TokenError::Signing("token expiry overflows".to_string()))?;
        let claims = Claims {
            login: login.to_string(),
            iat: now,
            exp,
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature, algorithm and expiry, then return the claims
    ///
    /// This is the only way to read a claim out of a token.
    pub fn authenticate(&self, token: &str) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        let data = decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)?;
        Ok(data.claims)
    }

    /// `Ok(false)` for a well-formed token that is not acceptable,
    /// `Err` when the token is absent or cannot be parsed at all.
    pub fn verify(&self, token: &str) -> Result<bool, TokenError> {
        match self.authenticate(token) {
            Ok(_) => Ok(true),
            Err(TokenError::InvalidSignature | TokenError::UnsupportedAlgorithm | TokenError::Expired) => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Login carried by an authenticated token
    pub fn login_of(&self, token: &str) -> Result<String, TokenError> {
        self.authenticate(token).map(|claims| claims.login)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.keys.ttl)
            .finish_non_exhaustive()
    }
}

/// Strip the `Bearer ` prefix from an `Authorization` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix(BEARER_PREFIX)
}

/// Format an `Authorization` header value for `token`
pub fn bearer_header(token: &str) -> String {
    format!("{}{}", BEARER_PREFIX, token)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SECRET: &[u8] = b"test-secret";
    const RS256_HEADER: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9";

    fn service() -> TokenService {
        TokenService::new(SECRET, Duration::from_secs(3600))
    }

    fn segments(token: &str) -> Vec<&str> {
        token.split('.').collect()
    }

    #[test]
    fn test_issue_rejects_overflowing_ttl() {
        let tokens = TokenService::new(SECRET, Duration::from_secs(u64::MAX));
        assert_matches!(tokens.issue("alice"), Err(TokenError::Signing(_)));
    }

    #[test]
    fn test_issue_and_authenticate() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();

        let claims = tokens.authenticate(&token).unwrap();
        assert_eq!(claims.login, "alice");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_login_of() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();
        assert_eq!(tokens.login_of(&token).unwrap(), "alice");
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(service().authenticate(""), Err(TokenError::Missing));
        assert_eq!(service().verify("  "), Err(TokenError::Missing));
    }

    #[test]
    fn test_garbage_token() {
        let result = service().authenticate("invalid.token.here");
        assert_matches!(result, Err(TokenError::Malformed(_)));
        assert_matches!(service().verify("not-a-jwt"), Err(TokenError::Malformed(_)));
    }

    #[test]
    fn test_wrong_secret() {
        let other = TokenService::new(b"another-secret", Duration::from_secs(3600));
        let token = other.issue("alice").unwrap();

        assert_eq!(service().authenticate(&token), Err(TokenError::InvalidSignature));
        assert_eq!(service().verify(&token), Ok(false));
    }

    #[test]
    fn test_tampered_payload() {
        let tokens = service();
        let alice = tokens.issue("alice").unwrap();
        let mallory = tokens.issue("mallory").unwrap();

        let alice = segments(&alice);
        let mallory = segments(&mallory);
        let forged = format!("{}.{}.{}", alice[0], mallory[1], alice[2]);

        assert_eq!(tokens.authenticate(&forged), Err(TokenError::InvalidSignature));
        assert!(tokens.login_of(&forged).is_err());
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        let tokens = service();
        let token = tokens.issue("alice").unwrap();
        let parts = segments(&token);
        let forged = format!("{}.{}.{}", RS256_HEADER, parts[1], parts[2]);

        assert_eq!(tokens.authenticate(&forged), Err(TokenError::UnsupportedAlgorithm));
    }

    #[test]
    fn test_other_hmac_algorithm_accepted() {
        let claims = Claims {
            login: "alice".to_string(),
            iat: unix_now(),
            exp: unix_now() + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(service().login_of(&token).unwrap(), "alice");
    }

    #[test]
    fn test_expired_token() {
        let claims = Claims {
            login: "alice".to_string(),
            iat: 1,
            exp: 2,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();

        assert_eq!(service().authenticate(&token), Err(TokenError::Expired));
        assert_eq!(service().verify(&token), Ok(false));
    }

    #[test]
    fn test_bearer_helpers() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token(&bearer_header("xyz")), Some("xyz"));
    }
}
