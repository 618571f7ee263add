//! Signed session tokens.
//!
//! Tokens are HS256 JWTs. User tokens carry the user id in `sub` and live
//! for 30 days; admin tokens carry the admin id in `admin` and live for 7.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const DAY_SECONDS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    User,
    Admin,
}

impl PrincipalKind {
    pub fn ttl_seconds(&self) -> u64 {
        match self {
            Self::User => 30 * DAY_SECONDS,
            Self::Admin => 7 * DAY_SECONDS,
        }
    }

    pub fn cookie_name(&self) -> &'static str {
        match self {
            Self::User => "qd4_token",
            Self::Admin => "qd4_admin_token",
        }
    }
}

/// Payload stored in a session token. Exactly one of `sub` / `admin` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

impl Claims {
    /// The principal id carried under the claim name for `kind`.
    pub fn principal(&self, kind: PrincipalKind) -> Option<&str> {
        match kind {
            PrincipalKind::User => self.sub.as_deref(),
            PrincipalKind::Admin => self.admin.as_deref(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken,

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("system time error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

/// Issues and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                validation,
            }),
        }
    }

    pub fn issue(&self, principal_id: Uuid, kind: PrincipalKind) -> Result<String, TokenError> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        self.issue_at(principal_id, kind, now)
    }

    fn issue_at(
        &self,
        principal_id: Uuid,
        kind: PrincipalKind,
        issued_at: u64,
    ) -> Result<String, TokenError> {
        let id = Some(principal_id.to_string());
        let (sub, admin) = match kind {
            PrincipalKind::User => (id, None),
            PrincipalKind::Admin => (None, id),
        };
        let claims = Claims {
            sub,
            admin,
            iat: issued_at,
            exp: issued_at + kind.ttl_seconds(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys.encoding,
        )?)
    }

    /// Decode a token, checking its signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "Token rejected");
                TokenError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-that-is-at-least-32-characters-long")
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn user_token_round_trip() {
        let tokens = service();
        let id = Uuid::new_v4();

        let claims = tokens.verify(&tokens.issue(id, PrincipalKind::User).unwrap()).unwrap();
        assert_eq!(claims.principal(PrincipalKind::User), Some(id.to_string().as_str()));
        assert_eq!(claims.principal(PrincipalKind::Admin), None);
        assert_eq!(claims.exp - claims.iat, 30 * DAY_SECONDS);
    }

    #[test]
    fn admin_token_uses_admin_claim() {
        let tokens = service();
        let id = Uuid::new_v4();

        let claims = tokens.verify(&tokens.issue(id, PrincipalKind::Admin).unwrap()).unwrap();
        assert_eq!(claims.principal(PrincipalKind::Admin), Some(id.to_string().as_str()));
        assert_eq!(claims.sub, None);
        assert_eq!(claims.exp - claims.iat, 7 * DAY_SECONDS);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = service().issue(Uuid::new_v4(), PrincipalKind::User).unwrap();
        let other = TokenService::new("a-completely-different-secret-of-some-length");
        assert!(matches!(other.verify(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(matches!(service().verify("not-a-jwt"), Err(TokenError::InvalidToken)));
        assert!(matches!(service().verify(""), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service();
        let long_ago = now() - 31 * DAY_SECONDS;
        let token = tokens
            .issue_at(Uuid::new_v4(), PrincipalKind::User, long_ago)
            .unwrap();
        assert!(matches!(tokens.verify(&token), Err(TokenError::InvalidToken)));

        let admin_token = tokens
            .issue_at(Uuid::new_v4(), PrincipalKind::Admin, now() - 8 * DAY_SECONDS)
            .unwrap();
        assert!(matches!(tokens.verify(&admin_token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let tokens = service();
        let token = tokens.issue(Uuid::new_v4(), PrincipalKind::User).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = tokens.issue(Uuid::new_v4(), PrincipalKind::Admin).unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_payload;
        assert!(tokens.verify(&parts.join(".")).is_err());
    }
}
