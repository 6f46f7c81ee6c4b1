use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use comedor_report::ReportError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Report error: {0}")]
    ReportError(#[from] ReportError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    InternalError(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<comedor_shared::UnknownDay> for AppError {
    fn from(err: comedor_shared::UnknownDay) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<comedor_monthly::UnknownLogField> for AppError {
    fn from(err: comedor_monthly::UnknownLogField) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BadRequest", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NotFound", msg),
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DatabaseError",
                    "Database error occurred. Please try again later.".to_string(),
                )
            }
            AppError::ReportError(e) => {
                tracing::error!("Report error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ReportError",
                    "The spreadsheet could not be generated.".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    "Something went wrong. Please try again later.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": error, "message": message }))).into_response()
    }
}
