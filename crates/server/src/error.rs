use axum::Json;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use portal_common::PortalError;
use portal_common::models::CreateBodyError;
use serde_json::json;
use std::fmt;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Certificate not found";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// The certificate operation a request was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    Fetch,
    Approve,
    Delete,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Submit => "Submission failed",
            Self::Fetch => "Failed to fetch certificates",
            Self::Approve => "Approval failed",
            Self::Delete => "Failed to delete certificate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Submit => "submit",
            Self::Fetch => "fetch",
            Self::Approve => "approve",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("request body too large: {0}")]
    PayloadTooLarge(String),
    #[error("{operation}: certificate {id} not found")]
    NotFound { operation: Operation, id: String },
    #[error("{operation} failed: {source}")]
    Failed {
        operation: Operation,
        #[source]
        source: PortalError,
    },
}

impl AppError {
    pub fn during(operation: Operation, err: PortalError) -> Self {
        match err {
            PortalError::NotFound(id) => Self::NotFound { operation, id },
            source => Self::Failed { operation, source },
        }
    }

    pub fn from_bytes_rejection(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }

    /// Malformed JSON is a 400; a field that cannot become text fails the submission.
    pub fn from_body_error(err: CreateBodyError) -> Self {
        match err {
            CreateBodyError::Malformed(reason) => Self::BadRequest(reason),
            CreateBodyError::InvalidField(reason) => Self::Failed {
                operation: Operation::Submit,
                source: PortalError::InvalidField(reason),
            },
        }
    }

    /// An id the router cannot even decode matches no record.
    pub fn from_path_rejection(operation: Operation, rejection: PathRejection) -> Self {
        Self::NotFound {
            operation,
            id: rejection.body_text(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => INVALID_BODY_MESSAGE,
            Self::PayloadTooLarge(_) => BODY_TOO_LARGE_MESSAGE,
            Self::NotFound { .. } => NOT_FOUND_MESSAGE,
            Self::Failed { operation, .. } => operation.failure_message(),
        }
    }
}

/// Tags a store result with the operation it belongs to.
pub trait OperationExt<T> {
    fn during(self, operation: Operation) -> Result<T, AppError>;
}

impl<T> OperationExt<T> for Result<T, PortalError> {
    fn during(self, operation: Operation) -> Result<T, AppError> {
        self.map_err(|err| AppError::during(operation, err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::BadRequest(reason) | AppError::PayloadTooLarge(reason) => {
                tracing::info!(
                    status = status.as_u16(),
                    reason = %reason,
                    "Rejected request body"
                );
            }
            AppError::NotFound { operation, id } => {
                tracing::info!(
                    status = status.as_u16(),
                    operation = %operation,
                    id = %id,
                    "Certificate not found"
                );
            }
            AppError::Failed { operation, source } => {
                tracing::error!(
                    status = status.as_u16(),
                    operation = %operation,
                    error = %source,
                    "Certificate operation failed"
                );
            }
        }

        let body = Json(json!({"error": self.public_message()}));
        (status, body).into_response()
    }
}
