use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{config::APP_CONFIG, models::GenericResponse, store::StoreError};

/// Error returned by every handler
///
/// `BadRequestErr` is raised before anything is written, `NotFound` and
/// `Conflict` come out of the pre-checks done inside a transaction and
/// `AnyError` wraps every fault of the store or the object storage.
#[derive(Debug)]
pub enum AppError {
    BadRequestErr(String),
    NotFound(String),
    Conflict(String),
    AnyError(anyhow::Error),
}

impl AppError {
    pub fn unknown_error() -> Self {
        Self::AnyError(anyhow::anyhow!("Unknown error"))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequestErr(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::AnyError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self, expose_details: bool) -> String {
        match self {
            Self::BadRequestErr(msg) | Self::NotFound(msg) | Self::Conflict(msg) => {
                msg.to_owned()
            }
            Self::AnyError(err) if expose_details => format!("Something went wrong: {err:#}"),
            Self::AnyError(_) => "Something went wrong".to_owned(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::AnyError(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(msg) => Self::Conflict(msg),
            StoreError::Backend(err) => Self::AnyError(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequestErr(msg) => tracing::debug!("Bad request: {}", msg),
            Self::NotFound(msg) => tracing::debug!("Not Found: {}", msg),
            Self::Conflict(msg) => tracing::debug!("Conflict: {}", msg),
            Self::AnyError(err) => tracing::error!("Something went wrong: {:?}", err),
        }
        let response = GenericResponse {
            success: false,
            message: self.message(APP_CONFIG.expose_error_details()),
        };
        (self.status_code(), Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let err: AppError = StoreError::Duplicate("dup".into()).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let err: AppError = StoreError::Backend(anyhow::anyhow!("broken pipe")).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_details_hidden_outside_development() {
        let err = AppError::AnyError(anyhow::anyhow!("connection reset"));
        assert_eq!(err.message(false), "Something went wrong");
        assert!(err.message(true).contains("connection reset"));
        let err = AppError::NotFound("Movie not found".into());
        assert_eq!(err.message(false), "Movie not found");
    }
}
