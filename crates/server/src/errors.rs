use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use serde::Serialize;
use service::errors::ServiceError;
use service::service_form::{FormError, FormErrors};
use thiserror::Error;
use tracing::error;

/// Handler error; the variant decides the status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 with per-field messages.
    #[error("invalid form: {0}")]
    Invalid(FormErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct FieldErrorsBody<'a> {
    errors: &'a FormErrors,
}

impl From<FormError> for ApiError {
    fn from(e: FormError) -> Self {
        match e {
            FormError::Invalid(errors) => ApiError::Invalid(errors),
            FormError::Store(ServiceError::NotFound(msg)) => ApiError::NotFound(msg),
            other => {
                error!(code = other.code(), error = %other, "service form failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(errors) => {
                (StatusCode::BAD_REQUEST, Json(FieldErrorsBody { errors: &errors })).into_response()
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(ErrorBody::new(msg))).into_response(),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(msg))).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::directory::DirectoryError;

    #[test]
    fn form_errors_map_to_status_codes() {
        let mut errors = FormErrors::default();
        errors.add("name", "This field is required.");
        assert_eq!(ApiError::from(FormError::Invalid(errors)).into_response().status(), StatusCode::BAD_REQUEST);

        let missing = FormError::Store(ServiceError::not_found("service"));
        assert_eq!(ApiError::from(missing).into_response().status(), StatusCode::NOT_FOUND);

        let down = FormError::Lookup(DirectoryError::Repository("connection refused".into()));
        assert_eq!(ApiError::from(down).into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
