//! HTTP error responses.
//!
//! Handlers return [`ApiError`]; each variant carries its status and message, so the boundary
//! only has to match on the variant. Core errors are converted with `?` via `From<CoreError>`.

use api_shared::ErrorRes;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use qform_core::CoreError;
use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        details: Option<Value>,
    },
    #[error("{message}")]
    Unprocessable {
        message: String,
        details: Option<Value>,
    },
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: None,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(message) => Self::bad_request(message),
            CoreError::UnsupportedFormat { .. } => Self::bad_request(err.to_string()),
            CoreError::Parse { what, path, message } => Self::Unprocessable {
                message: format!("{what} does not match the expected schema"),
                details: Some(json!({ "path": path, "reason": message })),
            },
            CoreError::InvalidTransition { .. } => Self::Conflict(err.to_string()),
            CoreError::Forbidden(message) => Self::Forbidden(message),
            CoreError::Export(_) | CoreError::FileRead(_) | CoreError::FileWrite(_) => {
                tracing::error!("internal error: {err}");
                Self::Internal("Internal error".into())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => Self::Unprocessable {
                message: "request body does not match the expected schema".into(),
                details: Some(json!({ "reason": err.body_text() })),
            },
            other => Self::BadRequest {
                message: other.body_text(),
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let details = match self {
            Self::BadRequest { details, .. } | Self::Unprocessable { details, .. } => details,
            _ => None,
        };

        let body = ErrorRes {
            status: status.as_u16(),
            message,
            details,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qform_core::FeedbackStatus;

    #[test]
    fn core_errors_map_to_http_statuses() {
        let cases = [
            (CoreError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (
                CoreError::Parse {
                    what: "submission",
                    path: "metadata.status".into(),
                    message: "unknown variant".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CoreError::InvalidTransition {
                    from: FeedbackStatus::New,
                    to: FeedbackStatus::Resolved,
                },
                StatusCode::CONFLICT,
            ),
            (CoreError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (
                CoreError::FileWrite(std::io::Error::other("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (core, expected) in cases {
            assert_eq!(ApiError::from(core).status(), expected);
        }
    }

    #[test]
    fn parse_errors_keep_the_failing_path() {
        let err = ApiError::from(CoreError::Parse {
            what: "submission",
            path: "metadata.status".into(),
            message: "unknown variant".into(),
        });
        match err {
            ApiError::Unprocessable { details, .. } => {
                let details = details.expect("details");
                assert_eq!(details["path"], "metadata.status");
            }
            other => panic!("expected Unprocessable, got {other:?}"),
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::from(CoreError::FileRead(std::io::Error::other("secret path")));
        assert_eq!(err.to_string(), "Internal error");
    }
}
