use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Input violated a precondition of the indicator engine
    /// (unordered timestamps, negative prices, empty series).
    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Not enough bars to resolve every indicator on the latest bar.
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::InvalidSeries(_)
            | AppError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
            AppError::InsufficientHistory(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Trade store error: {}", e);
                "trade store unavailable".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidSeries("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InsufficientHistory("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InvalidConfig("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::BadRequest("missing stock".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
