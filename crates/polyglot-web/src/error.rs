use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use polyglot_core::ActionOutcome;

/// Failures that escape the action handlers: model load and inference
/// errors, or a request body that could not be read.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] polyglot_core::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ActionOutcome::failure(self.to_string()))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
