//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::http::{header, HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use bizreg_upstream::SubmitClient;

use crate::handlers::{countries, health, submit};
use crate::state::AppState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /v1/countries` - Static country table for the form UI
/// - `POST /v1/registrations` - Submit a registration
/// - `OPTIONS /v1/registrations` - CORS preflight (204, no body)
///
/// Any other method on `/v1/registrations` gets a structured 405.
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: SubmitClient + 'static,
{
    // Extract config values before moving state
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS, Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("idempotency-key"),
        ]);

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Country table for the form's selector
        .route("/v1/countries", get(countries::list_countries))
        // Submission gateway
        .route(
            "/v1/registrations",
            post(submit::submit::<C>)
                .options(submit::preflight)
                .fallback(submit::method_not_allowed),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
