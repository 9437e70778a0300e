//! API error types and the stable response body.
//!
//! Every response the gateway produces, success or failure, carries the
//! same JSON shape: `{"status": "ok"|"error", "message": "...", "details"?}`.
//! `ApiError` covers the failure half of the vocabulary and maps each
//! condition to its HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use bizreg_core::FieldErrors;
use bizreg_upstream::UpstreamError;

/// Stable response body returned to the caller.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    /// `"ok"` or `"error"`.
    pub status: &'static str,
    /// Human-readable message, rendered verbatim by the form UI.
    pub message: String,
    /// Per-field validation errors, present only on validation failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

impl StatusBody {
    /// A success body.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok",
            message: message.into(),
            details: None,
        }
    }

    /// An error body.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
            details: None,
        }
    }
}

/// Gateway error type that implements `IntoResponse`.
///
/// Note that two variants deliberately map to HTTP 200: a blocklist match
/// and an upstream logical error are business failures, not transport
/// failures, and the form UI distinguishes them via `body.status`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request used a method other than POST or OPTIONS.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The client's rate-limit quota is spent.
    #[error("Too many requests. Try again later.")]
    RateLimited {
        /// Seconds until the client's window resets.
        retry_after_seconds: u64,
    },

    /// The request body was not valid JSON.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The payload failed field validation.
    #[error("Validation error")]
    Validation(FieldErrors),

    /// The business name matched the blocklist; no upstream call was made.
    #[error("A company with the same name has been detected. Please change the information entered.")]
    PolicyRejection,

    /// The upstream service answered with a 5xx status.
    #[error("Upstream error. Try again.")]
    UpstreamServer,

    /// No HTTP exchange could be completed within the retry budget.
    #[error("Network timeout. Try again.")]
    Transport,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PolicyRejection => StatusCode::OK,
            Self::UpstreamServer => StatusCode::BAD_GATEWAY,
            Self::Transport => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        let retry_after = match &self {
            Self::RateLimited {
                retry_after_seconds,
            } => Some(*retry_after_seconds),
            _ => None,
        };
        let details = match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        };

        let body = StatusBody {
            status: "error",
            message,
            details,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(seconds) = retry_after {
            if let Ok(value) = seconds.to_string().parse() {
                response.headers_mut().insert("retry-after", value);
            }
        }
        response
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Transport(detail) => {
                tracing::error!(error = %detail, "upstream transport failure");
                Self::Transport
            }
        }
    }
}
