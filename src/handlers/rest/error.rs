use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    dto::ErrorResponse,
    repository::StoreError,
    service::ServiceError,
};

pub const NOT_FOUND: &str = "Note not found";
pub const INTERNAL: &str = "Internal server error";

/// Error returned by REST handlers, rendered as `{"error": "..."}`.
///
/// Store failures are logged here and replaced by a generic message.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND.to_string()),
            Self::Internal(e) => {
                tracing::error!(error = ?e, "store failure: {}", error_chain(&e));
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Joins an error with all of its sources, so driver details such as the
/// server message reach the log.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }

    chain
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => Self::BadRequest(msg.to_string()),
            ServiceError::NotFound => Self::NotFound,
            ServiceError::Store(e) => Self::Internal(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

// A non-numeric id cannot name any note.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("rejected note id: {}", rejection.body_text());
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        source: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.source.as_deref().map(|s| s as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn error_chain_includes_every_source() {
        let err = Layer {
            message: "database query failed",
            source: Some(Box::new(Layer {
                message: "db error",
                source: Some(Box::new(Layer {
                    message: "value too long for type character varying(255)",
                    source: None,
                })),
            })),
        };

        assert_eq!(
            error_chain(&err),
            "database query failed: db error: value too long for type character varying(255)"
        );
    }

    #[test]
    fn store_failure_body_stays_generic() {
        let response =
            ApiError::Internal(StoreError::Pool(bb8::RunError::TimedOut)).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
