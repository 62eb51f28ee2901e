use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body for ownership and missing-row outcomes. One text for both, so a
/// caller cannot tell a foreign row from a nonexistent one.
pub const NOT_FOUND_MSG: &str = "Data tidak ditemukan atau Anda tidak memiliki akses.";

/// Generic body for unexpected faults; details stay in the server log.
pub const SERVER_ERROR_MSG: &str = "Terjadi kesalahan pada server.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Session(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request failed");
        }

        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MSG),
            Self::Session(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MSG)
            }
        };

        (status, message).into_response()
    }
}
