use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::forms::SchemaError;
use common::requests::ErrorBody;
use log::error;
use thiserror::Error;

/// Failures that end a request. Rejected submissions are not errors; they
/// are answered directly by the submit handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("invalid form template: {0}")]
    Schema(#[from] SchemaError),
    #[error("{0}")]
    BadRequest(String),
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("background task failed: {0}")]
    Internal(#[from] tokio::task::JoinError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("{}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody {
            ok: false,
            error: message,
        })
    }
}
