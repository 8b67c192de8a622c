//! API error type and status mapping.
//!
//! | error                         | status | `error` field     |
//! |-------------------------------|--------|-------------------|
//! | validation / malformed body   | 422    | `ValidationError` |
//! | unknown note or action item   | 404    | `NotFound`        |
//! | storage failure               | 500    | `DatabaseError`   |
//! | anything else                 | 500    | `InternalError`   |

use crate::schemas::ErrorResponse;
use actionnote_core::{ServiceError, ValidationError};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use std::fmt::{Display, Formatter};

const HIDDEN_DETAIL: &str = "An unexpected error occurred";

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(String),
    Database(String),
    Internal { detail: String, expose: bool },
}

impl ApiError {
    pub fn internal(detail: impl Into<String>, expose: bool) -> Self {
        Self::Internal {
            detail: detail.into(),
            expose,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::NotFound(_) => "NotFound",
            Self::Database(_) => "DatabaseError",
            Self::Internal { .. } => "InternalError",
        }
    }

    fn public_detail(&self) -> String {
        match self {
            Self::Validation(detail) | Self::NotFound(detail) | Self::Database(detail) => {
                detail.clone()
            }
            Self::Internal { detail, expose } => {
                if *expose {
                    detail.clone()
                } else {
                    HIDDEN_DETAIL.to_string()
                }
            }
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(detail) | Self::NotFound(detail) | Self::Database(detail) => {
                write!(f, "{}: {detail}", self.kind())
            }
            Self::Internal { detail, .. } => write!(f, "{}: {detail}", self.kind()),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::InvalidInput(err) => Self::Validation(err.to_string()),
            ServiceError::NoteNotFound(_) | ServiceError::ActionItemNotFound(_) => {
                Self::NotFound(value.to_string())
            }
            ServiceError::Repo(err) => Self::Database(err.to_string()),
            ServiceError::InconsistentState(_) => Self::internal(value.to_string(), false),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Validation(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::Validation(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::Validation(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_error module=server status=error http_status={} error={}",
                status.as_u16(),
                self
            );
        }
        let body = ErrorResponse {
            error: self.kind().to_string(),
            detail: self.public_detail(),
            status_code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
