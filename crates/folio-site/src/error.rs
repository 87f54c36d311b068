use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_common::error::CommonError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("config error: {0}")]
    Config(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Common(err) => match err {
                CommonError::UnknownSection(_) | CommonError::UnknownItem { .. } => {
                    StatusCode::NOT_FOUND
                }
                CommonError::NoActiveSession | CommonError::SectionMismatch { .. } => {
                    StatusCode::CONFLICT
                }
                CommonError::UnknownField { .. }
                | CommonError::InvalidValue { .. }
                | CommonError::UnsupportedOp { .. }
                | CommonError::IndexOutOfRange { .. }
                | CommonError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                CommonError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
