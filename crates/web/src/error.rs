use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use importer::ImporterError;
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use storage::services::reconciliation::ReconcileError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
    NotFound(String),
    Unprocessable(String),
    /// The Blue Alliance failed or returned unusable data
    Upstream(String),
    /// A required setting such as the TBA API key is missing
    Unavailable(String),
    InternalServerError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Unprocessable(msg) => write!(f, "Unprocessable: {}", msg),
            Self::Upstream(msg) => write!(f, "Upstream error: {}", msg),
            Self::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::InvalidData(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg))
            | Self::Storage(StorageError::InvalidData(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
            Self::BadRequest(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Unprocessable(msg)
            | Self::Unavailable(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Upstream(msg) => {
                tracing::warn!("Upstream failure: {}", msg);
                json!({
                    "error": msg
                })
            }
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                json!({
                    "error": "An internal error occurred"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<ReconcileError> for WebError {
    fn from(error: ReconcileError) -> Self {
        match error {
            ReconcileError::Configuration(msg) => Self::Unavailable(msg),
            ReconcileError::UnsupportedSeason(_) => Self::Unprocessable(error.to_string()),
            ReconcileError::Fetch(e) => Self::Upstream(e.to_string()),
            ReconcileError::Storage(e) => Self::Storage(e),
        }
    }
}

impl From<ImporterError> for WebError {
    fn from(error: ImporterError) -> Self {
        match error {
            ImporterError::ConfigurationError(msg) => Self::Unavailable(msg),
            ImporterError::StorageError(e) => Self::Storage(e),
            ImporterError::DatabaseError(e) => Self::Storage(StorageError::Database(e)),
            ImporterError::RequestError(_)
            | ImporterError::StatusError { .. }
            | ImporterError::ParseError(_)
            | ImporterError::TransformationError(_) => Self::Upstream(error.to_string()),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use storage::services::reconciliation::FetchError;

    fn status(error: impl Into<WebError>) -> StatusCode {
        error.into().into_response().status()
    }

    #[test]
    fn test_storage_errors_map_to_statuses() {
        assert_eq!(status(StorageError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status(StorageError::ConstraintViolation("dup".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(StorageError::InvalidData("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_reconcile_errors_map_to_statuses() {
        assert_eq!(
            status(ReconcileError::UnsupportedSeason(2019)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(ReconcileError::Fetch(FetchError::Status {
                key: "2025test_qm1".to_string(),
                status: 500,
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(ReconcileError::Configuration("TBA_API_KEY is not set".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_missing_tba_key_is_unavailable() {
        assert_eq!(
            status(ImporterError::ConfigurationError("TBA_API_KEY is not set".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
