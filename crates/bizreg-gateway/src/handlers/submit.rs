//! Registration submission endpoint.
//!
//! The orchestrator: rate limit, validate, blocklist check, country
//! resolution, upstream call, outcome mapping. The order matters: an
//! over-quota client is rejected before its payload is even parsed.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use bizreg_core::{resolve_country, validate, RegistrationBody};
use bizreg_upstream::{Address, ContactInfo as UpstreamContact, SubmitClient, SubmitPayload, UpstreamOutcome};

use crate::error::{ApiError, StatusBody};
use crate::identity::client_identity;
use crate::ratelimit::Admission;
use crate::state::AppState;

/// Reserved substring; a business name containing it (case-insensitively)
/// is rejected locally without an upstream call.
const BLOCKED_NAME: &str = "sancrisoft";

/// Default message for an upstream success without its own message.
const DEFAULT_OK_MESSAGE: &str =
    "Thanks for submitting your company! We’ll be in touch shortly.";

/// Default message for an upstream logical error without its own message.
const DEFAULT_ERROR_MESSAGE: &str = "There was an error.";

/// Handle `POST /v1/registrations`.
///
/// # Errors
///
/// Every failure path returns a structured [`ApiError`]; nothing propagates
/// an unhandled failure to the caller.
pub async fn submit<C: SubmitClient>(
    State(state): State<Arc<AppState<C>>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<StatusBody>), ApiError> {
    let identity = client_identity(&headers, peer.map(|ConnectInfo(addr)| addr));

    // Rate limit first: over-quota clients don't get their payload parsed.
    if let Admission::Denied { reset_at } = state.limiter.admit(&identity) {
        let retry_after_seconds = reset_at.saturating_duration_since(Instant::now()).as_secs();
        tracing::warn!(client = %identity, "rate limit exceeded");
        return Err(ApiError::RateLimited {
            retry_after_seconds,
        });
    }

    let body: RegistrationBody = serde_json::from_slice(&body)
        .map_err(|err| ApiError::BadRequest(format!("invalid JSON body: {err}")))?;

    let registration = validate(&body).map_err(|errors| {
        tracing::debug!(client = %identity, fields = errors.len(), "validation failed");
        ApiError::Validation(errors)
    })?;

    // Local policy short-circuit, distinct from upstream-reported errors.
    if registration
        .business
        .name
        .to_lowercase()
        .contains(BLOCKED_NAME)
    {
        tracing::info!(client = %identity, "blocked business name");
        return Err(ApiError::PolicyRejection);
    }

    let country = resolve_country(&registration.contact.country_code);
    let phone_display = format!("{} {}", country.dial_code, registration.contact.phone);

    let payload = SubmitPayload {
        name: registration.business.name,
        business_type: registration.business.business_type,
        address: Address {
            line1: registration.business.address1,
            line2: registration.business.address2,
            city: registration.business.city,
            state: registration.business.state,
            zip: registration.business.zip,
        },
        contact: UpstreamContact {
            first_name: registration.contact.first_name,
            last_name: registration.contact.last_name,
            email: registration.contact.email,
            phone: phone_display,
        },
    };

    let idempotency_key = headers
        .get("idempotency-key")
        .and_then(|v| v.to_str().ok());

    let outcome = state.client.send(&payload, idempotency_key).await?;
    tracing::info!(client = %identity, upstream_status = outcome.status, "registration relayed");

    Ok(map_outcome(&outcome))
}

/// Map a completed upstream exchange to the caller-facing response.
fn map_outcome(outcome: &UpstreamOutcome) -> (StatusCode, Json<StatusBody>) {
    if outcome.status >= 500 {
        return (
            StatusCode::BAD_GATEWAY,
            Json(StatusBody::error("Upstream error. Try again.")),
        );
    }

    let body_status = outcome.body.get("status").and_then(Value::as_str);
    let message = outcome.body.get("message").and_then(Value::as_str);

    match (outcome.status, body_status) {
        (200, Some("ok")) => (
            StatusCode::OK,
            Json(StatusBody::ok(message.unwrap_or(DEFAULT_OK_MESSAGE))),
        ),
        (200, Some("error")) => (
            StatusCode::OK,
            Json(StatusBody::error(message.unwrap_or(DEFAULT_ERROR_MESSAGE))),
        ),
        // Any other non-5xx shape counts as an accepted submission.
        _ => (
            StatusCode::OK,
            Json(StatusBody::ok(message.unwrap_or("Submitted."))),
        ),
    }
}

/// Handle `OPTIONS /v1/registrations`: 204 with permissive CORS headers.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                "Content-Type, Idempotency-Key",
            ),
        ],
    )
}

/// Fallback for any other method on the registrations path.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(status: u16, body: Value) -> UpstreamOutcome {
        UpstreamOutcome { status, body }
    }

    #[test]
    fn upstream_5xx_maps_to_bad_gateway() {
        let (status, body) = map_outcome(&outcome(500, json!({"status": "error"})));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.status, "error");
        assert_eq!(body.message, "Upstream error. Try again.");
    }

    #[test]
    fn upstream_ok_uses_its_message() {
        let (status, body) =
            map_outcome(&outcome(200, json!({"status": "ok", "message": "Welcome"})));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.message, "Welcome");
    }

    #[test]
    fn upstream_ok_without_message_uses_default() {
        let (_, body) = map_outcome(&outcome(200, json!({"status": "ok"})));
        assert_eq!(body.message, DEFAULT_OK_MESSAGE);
    }

    #[test]
    fn upstream_logical_error_stays_http_ok() {
        let (status, body) = map_outcome(&outcome(
            200,
            json!({"status": "error", "message": "Duplicate company"}),
        ));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "error");
        assert_eq!(body.message, "Duplicate company");
    }

    #[test]
    fn unrecognized_shape_counts_as_submitted() {
        let (status, body) = map_outcome(&outcome(200, json!({"result": 42})));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.message, "Submitted.");

        let (status, body) = map_outcome(&outcome(404, json!({"status": "error"})));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }
}
