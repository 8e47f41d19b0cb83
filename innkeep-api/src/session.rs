use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Longest lifetime a configuration may ask for.
const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Body of `POST /jwt`: who the session is for.
#[derive(Debug, Clone, Deserialize)]
pub struct UserClaims {
    pub email: String,
}

/// Payload signed into the `token` cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated caller, placed in request extensions by the session guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Self { email: claims.email }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// Issues and verifies HS256 session tokens. Holds no state beyond the keys.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        if ttl_seconds > MAX_TTL_SECONDS {
            tracing::warn!(
                "Session lifetime of {}s exceeds the {}s ceiling; clamping",
                ttl_seconds,
                MAX_TTL_SECONDS
            );
        }
        let ttl_seconds = ttl_seconds.min(MAX_TTL_SECONDS) as i64;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    pub fn issue(&self, user: &UserClaims) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now())
    }

    pub fn issue_at(&self, user: &UserClaims, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = SessionClaims {
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Fails on a bad signature, a malformed token or an expired one.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> UserClaims {
        UserClaims { email: email.to_string() }
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = TokenService::new("test-secret", 86_400);
        let token = tokens.issue(&user("a@x.com")).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_token_older_than_a_day_is_rejected() {
        let tokens = TokenService::new("test-secret", 86_400);
        let issued = Utc::now() - Duration::days(1) - Duration::minutes(1);
        let token = tokens.issue_at(&user("a@x.com"), issued).unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn test_token_within_a_day_is_accepted() {
        let tokens = TokenService::new("test-secret", 86_400);
        let issued = Utc::now() - Duration::hours(23);
        let token = tokens.issue_at(&user("a@x.com"), issued).unwrap();

        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_oversized_lifetime_is_clamped() {
        let tokens = TokenService::new("test-secret", u64::MAX);
        let token = tokens.issue(&user("a@x.com")).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, MAX_TTL_SECONDS as i64);
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let ours = TokenService::new("test-secret", 86_400);
        let theirs = TokenService::new("another-secret", 86_400);
        let token = theirs.issue(&user("a@x.com")).unwrap();

        assert!(ours.verify(&token).is_err());
        assert!(ours.verify("not.a.jwt").is_err());
        assert!(ours.verify("").is_err());
    }
}
