use crate::repository;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jwt_auth::error::MissingRoleError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("ticket invalid: {0}")]
    TicketInvalid(&'static str),

    #[error("auth error: {0}")]
    Auth(#[from] MissingRoleError),

    #[error("database error: {0}")]
    Database(#[from] repository::Error),

    #[error("operation timed out")]
    OperationTimeout,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        // Storage details never reach the client
        let (status, message) = match &self {
            Error::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, *message),
            Error::TicketInvalid(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Error::Auth(_) => (StatusCode::FORBIDDEN, "Forbidden"),
            Error::Database(_) | Error::OperationTimeout => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Operation failed")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
