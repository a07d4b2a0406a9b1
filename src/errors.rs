use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::service::ServiceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid profile body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to read request body: {0}")]
    Body(#[source] BytesRejection),
    #[error("invalid path: {0}")]
    Path(#[source] PathRejection),
    /// A handler expected a route variable the route table did not bind.
    #[error("inconsistent mapping between route and handler (programmer error)")]
    BadRouting {
        route: &'static str,
        variable: &'static str,
    },
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl AppError {
    pub fn bad_routing(route: &'static str, variable: &'static str) -> Self {
        Self::BadRouting { route, variable }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode_error",
            Self::Body(_) => "invalid_body",
            Self::Path(_) => "invalid_path",
            Self::BadRouting { .. } => "bad_routing",
            Self::Service(_) => "service_error",
            Self::Encode(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message, details) = match &self {
            Self::Decode(err) => {
                tracing::debug!(error = %err, "rejected undecodable request body");
                (StatusCode::BAD_REQUEST, self.to_string(), json!({}))
            }
            Self::Body(rejection) => {
                tracing::debug!(error = %rejection, "rejected unreadable request body");
                (rejection.status(), self.to_string(), json!({}))
            }
            Self::Path(rejection) => {
                tracing::debug!(error = %rejection, "rejected undecodable path");
                (rejection.status(), self.to_string(), json!({}))
            }
            Self::BadRouting { route, variable } => {
                tracing::error!(route, variable, "route variable missing for handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.to_string(),
                    json!({ "route": route, "variable": variable }),
                )
            }
            Self::Service(err) => {
                tracing::warn!(error = %err, "service call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.message().to_string(),
                    json!({}),
                )
            }
            Self::Encode(err) => {
                tracing::error!(error = %err, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    json!({}),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                code: code.to_string(),
                message,
                details,
            }),
        )
            .into_response()
    }
}
