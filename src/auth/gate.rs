//! The session gate.
//!
//! Every protected handler resolves its principal here before touching the
//! store. Verification failures never surface as errors: a missing cookie,
//! a bad signature, an expired token and a token of the wrong kind all
//! collapse into [`SessionState::Unauthenticated`].

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::debug;
use uuid::Uuid;

use super::cookies::read_cookie;
use super::{PrincipalKind, TokenService};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated(Uuid),
    Unauthenticated,
}

impl SessionState {
    pub fn principal(self) -> Option<Uuid> {
        match self {
            Self::Authenticated(id) => Some(id),
            Self::Unauthenticated => None,
        }
    }
}

pub fn authenticate_user(tokens: &TokenService, headers: &HeaderMap) -> SessionState {
    authenticate(tokens, headers, PrincipalKind::User)
}

pub fn authenticate_admin(tokens: &TokenService, headers: &HeaderMap) -> SessionState {
    authenticate(tokens, headers, PrincipalKind::Admin)
}

fn authenticate(tokens: &TokenService, headers: &HeaderMap, kind: PrincipalKind) -> SessionState {
    let Some(token) = read_cookie(headers, kind.cookie_name()) else {
        return SessionState::Unauthenticated;
    };

    let claims = match tokens.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(cookie = kind.cookie_name(), error = %e, "Session cookie rejected");
            return SessionState::Unauthenticated;
        }
    };

    match claims.principal(kind).map(Uuid::parse_str) {
        Some(Ok(id)) => SessionState::Authenticated(id),
        _ => {
            debug!(cookie = kind.cookie_name(), "Session token lacks a usable principal");
            SessionState::Unauthenticated
        }
    }
}

/// Extractor for handlers that require a signed-in user.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

/// Extractor for handlers that require a signed-in admin.
#[derive(Debug, Clone, Copy)]
pub struct CurrentAdmin(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = TokenService::from_ref(state);
        authenticate_user(&tokens, &parts.headers)
            .principal()
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for CurrentAdmin
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = TokenService::from_ref(state);
        authenticate_admin(&tokens, &parts.headers)
            .principal()
            .map(CurrentAdmin)
            .ok_or(ApiError::Unauthorized)
    }
}
