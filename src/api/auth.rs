use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use quest_core::models::CreateUserInput;

use super::{blocking, required, AppState};
use crate::auth::cookies::{clear_cookie, session_cookie};
use crate::auth::{authenticate_user, hash_password, verify_password, PrincipalKind, SessionState};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    email: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

fn normalize_email(email: Option<String>) -> Option<String> {
    required(email).map(|e| e.to_lowercase())
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let (Some(email), Some(username), Some(password)) = (
        normalize_email(req.email),
        required(req.username),
        req.password,
    ) else {
        return Err(ApiError::BadRequest("Missing fields".into()));
    };

    // Password policy (empty, oversized) is enforced by the hasher.
    let password_hash = blocking(move || Ok(hash_password(&password)?)).await?;
    let user = state
        .db
        .create_user(CreateUserInput {
            email,
            username,
            password_hash,
        })?
        .ok_or_else(|| ApiError::BadRequest("Email already registered".into()))?;

    let token = state.tokens.issue(user.id, PrincipalKind::User)?;
    info!(user_id = %user.id, "User signed up");

    let cookie = session_cookie(PrincipalKind::User, &token, state.config.secure_cookies());
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true, "user": user })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let (Some(email), Some(password)) = (
        normalize_email(req.email),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::BadRequest("Missing fields".into()));
    };

    let user = state
        .db
        .get_user_by_email(&email)?
        .ok_or(ApiError::InvalidCredentials)?;

    let hash = user.password_hash.clone();
    if !blocking(move || Ok(verify_password(&password, &hash)?)).await? {
        return Err(ApiError::InvalidCredentials);
    }

    state.db.touch_user(user.id)?;
    let user = state.db.get_user(user.id)?.unwrap_or(user);

    let token = state.tokens.issue(user.id, PrincipalKind::User)?;
    info!(user_id = %user.id, "User logged in");

    let cookie = session_cookie(PrincipalKind::User, &token, state.config.secure_cookies());
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true, "user": user })),
    ))
}

/// POST /api/auth/logout
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_cookie(PrincipalKind::User))],
        Json(json!({ "success": true })),
    )
}

/// GET /api/auth/me
///
/// Answers `{"user": null}` rather than 401 when there is no session.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let user = match authenticate_user(&state.tokens, &headers) {
        SessionState::Authenticated(id) => state.db.get_user(id)?,
        SessionState::Unauthenticated => None,
    };

    Ok(Json(json!({ "user": user })))
}
