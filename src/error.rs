use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use quest_core::leveling::RewardError;
use quest_core::CompletionError;

use crate::auth::{PasswordError, TokenError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            tracing::error!(error = ?err, "Request failed");
        }

        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<CompletionError> for ApiError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::NotFound(what) => Self::NotFound(capitalized(what)),
            CompletionError::Store(e) => Self::Internal(e),
        }
    }
}

impl From<RewardError> for ApiError {
    fn from(err: RewardError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        if err.is_rejected_input() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.into())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

fn capitalized(kind: &'static str) -> &'static str {
    match kind {
        "task" => "Task",
        "quest" => "Quest",
        "focus session" => "Session",
        "boss challenge" => "Challenge",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("Task").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BadRequest("Missing title".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("disk on fire")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let err = ApiError::Internal(anyhow::anyhow!("SQLITE_CORRUPT at page 7"));
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn completion_not_found_maps_to_404() {
        let err: ApiError = CompletionError::NotFound("task").into();
        assert!(matches!(err, ApiError::NotFound("Task")));
    }

    #[test]
    fn oversized_reward_is_a_bad_request() {
        let err: ApiError = RewardError::TooLarge.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn focus_and_boss_not_found_read_naturally() {
        let err: ApiError = CompletionError::NotFound("focus session").into();
        assert_eq!(err.to_string(), "Session not found");
        let err: ApiError = CompletionError::NotFound("boss challenge").into();
        assert_eq!(err.to_string(), "Challenge not found");
    }

    #[test]
    fn password_policy_violations_are_bad_requests() {
        let err: ApiError = PasswordError::TooLong.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let err: ApiError = PasswordError::MalformedHash("x".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
