//! Error type for the HTTP routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clim_obs::ResolverError;
use serde::Serialize;

/// Errors a route can end in. Each one is terminal for its request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A `start`/`end` path segment is not a `yyyy-MM-dd` date
    #[error("invalid date '{input}', expected yyyy-MM-dd: {reason}")]
    DateParse { input: String, reason: String },

    /// The resolver had nothing to work with
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// The most active station has no row in the station table
    #[error("station '{0}' not found")]
    UnknownStation(String),

    /// No route matches the request path
    #[error("route not found")]
    NotFound,

    /// Query or connection failure in the store
    #[error("database error: {0:#}")]
    Store(#[from] anyhow::Error),

    /// A blocking database task panicked or was cancelled
    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status code for this error variant.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DateParse { .. } => StatusCode::BAD_REQUEST,
            ApiError::Resolver(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnknownStation(_) | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code (e.g. "invalid_date").
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::DateParse { .. } => "invalid_date",
            ApiError::Resolver(ResolverError::EmptyInput) => "empty_input",
            ApiError::Resolver(ResolverError::NoObservations) => "no_observations",
            ApiError::UnknownStation(_) => "station_not_found",
            ApiError::NotFound => "not_found",
            ApiError::Store(_) | ApiError::Task(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Store details stay in the log, not in the response body.
        let message = if status.is_server_error() {
            log::error!("request failed: {}", self);
            "internal server error".to_string()
        } else {
            log::warn!("request rejected: {}", self);
            self.to_string()
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message,
            },
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parse_is_bad_request() {
        let err = ApiError::DateParse {
            input: "2017-13-01".to_string(),
            reason: "input is out of range".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "invalid_date");
        assert!(err.to_string().contains("2017-13-01"));
    }

    #[test]
    fn resolver_errors_keep_their_code() {
        let empty: ApiError = ResolverError::EmptyInput.into();
        let none: ApiError = ResolverError::NoObservations.into();
        assert_eq!(empty.code(), "empty_input");
        assert_eq!(none.code(), "no_observations");
        assert_eq!(empty.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn store_errors_are_internal() {
        let err: ApiError = anyhow::anyhow!("disk I/O error").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "internal");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
