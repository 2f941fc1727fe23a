use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::clients::anilist::UpstreamError;
use crate::services::{CatalogError, DiscoverError};

/// Message returned whenever the upstream answers with a non-200 status.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch data from Anilist API";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    /// Upstream replied with this non-200 status; it is forwarded as-is.
    UpstreamStatus(u16),

    UpstreamTimeout,

    UpstreamUnavailable(String),

    UpstreamMalformed(String),

    ValidationError(String),

    Conflict(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::UpstreamStatus(status) => write!(f, "AniList responded with {}", status),
            ApiError::UpstreamTimeout => write!(f, "AniList request timed out"),
            ApiError::UpstreamUnavailable(msg) => write!(f, "AniList unreachable: {}", msg),
            ApiError::UpstreamMalformed(msg) => write!(f, "AniList payload error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::UpstreamStatus(code) => (
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY),
                UPSTREAM_FAILURE_MESSAGE.to_string(),
            ),
            ApiError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Anilist API timed out".to_string(),
            ),
            ApiError::UpstreamUnavailable(msg) => {
                tracing::warn!("AniList transport error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Anilist API is unreachable".to_string(),
                )
            }
            ApiError::UpstreamMalformed(msg) => {
                tracing::warn!("AniList payload error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Anilist API returned an unexpected response".to_string(),
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: error_message,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl From<DiscoverError> for ApiError {
    fn from(err: DiscoverError) -> Self {
        match err {
            DiscoverError::Upstream(UpstreamError::Status(code)) => ApiError::UpstreamStatus(code),
            DiscoverError::Upstream(UpstreamError::Timeout) => ApiError::UpstreamTimeout,
            DiscoverError::Upstream(UpstreamError::Transport(msg)) => {
                ApiError::UpstreamUnavailable(msg)
            }
            DiscoverError::Upstream(UpstreamError::Decode(msg)) => {
                ApiError::UpstreamMalformed(msg)
            }
            DiscoverError::Encode(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(what) => ApiError::NotFound(format!("{what} not found")),
            CatalogError::Conflict(what) => ApiError::Conflict(format!("{what} already exists")),
            CatalogError::InvalidData(msg) => ApiError::ValidationError(msg),
            CatalogError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn missing_param(name: &str) -> Self {
        ApiError::ValidationError(format!("Missing required query parameter '{name}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_upstream_status_is_forwarded() {
        let (status, body) = render(ApiError::UpstreamStatus(429)).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, serde_json::json!({ "error": UPSTREAM_FAILURE_MESSAGE }));
    }

    #[tokio::test]
    async fn test_transport_failures_map_to_gateway_errors() {
        let (status, _) = render(DiscoverError::Upstream(UpstreamError::Timeout).into()).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

        let (status, body) = render(
            DiscoverError::Upstream(UpstreamError::Transport("connection refused".into())).into(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Anilist API is unreachable");
    }

    #[tokio::test]
    async fn test_database_details_are_not_leaked() {
        let (status, body) = render(ApiError::DatabaseError("disk I/O error".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "A database error occurred");
    }
}
