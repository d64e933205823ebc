use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Service-level failures, mapped to a fixed status and JSON message at the
/// HTTP boundary. All failures are terminal per request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("User already exists")]
    Conflict,

    #[error("User not found. Please sign up.")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Feedback not found")]
    FeedbackNotFound,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Validation(&'static str),

    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::UserNotFound | ApiError::InvalidCredentials | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::FeedbackNotFound => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// True when the underlying store error is a Postgres unique-constraint
/// violation (code 23505). Lets an insert that lost a race still surface
/// as Conflict instead of a 500.
pub fn is_unique_violation(e: &anyhow::Error) -> bool {
    e.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            tracing::error!(error = %e, "internal error");
        }
        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::UserNotFound.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::FeedbackNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Forbidden("nope").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_error_hides_details() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "Server error");
    }

    #[test]
    fn forbidden_keeps_its_message() {
        let err = ApiError::Forbidden("Only admins can reply");
        assert_eq!(err.to_string(), "Only admins can reply");
    }

    #[test]
    fn plain_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&anyhow::anyhow!("boom")));
    }

    #[test]
    fn non_database_sqlx_errors_are_not_unique_violations() {
        let e = anyhow::Error::from(sqlx::Error::RowNotFound);
        assert!(!is_unique_violation(&e));
    }
}
