//! HTTP submission gateway for business registrations.
//!
//! This crate provides the public-facing endpoint that accepts a validated
//! business-registration payload, protects the upstream service from abuse
//! and duplicate work, and relays the result back to the caller with a
//! small, stable response vocabulary. It handles:
//!
//! - Per-client rate limiting (sliding quota per identity)
//! - Payload validation with per-field errors
//! - A business-name blocklist short-circuit
//! - Idempotent replay and bounded retries against the upstream service
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                Form UI (client)                │
//! └────────────────────────────────────────────────┘
//!                        │ POST /v1/registrations
//!                        ▼
//! ┌────────────────────────────────────────────────┐
//! │                 bizreg-gateway                  │
//! │  ┌──────────┐ ┌───────────┐ ┌───────────────┐  │
//! │  │   Rate   │ │ Validator │ │   Blocklist   │  │
//! │  │  Limiter │ │  (core)   │ │    Policy     │  │
//! │  └──────────┘ └───────────┘ └───────────────┘  │
//! └────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌────────────────────────────────────────────────┐
//! │   bizreg-upstream (retries + idempotency)      │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bizreg_gateway::{create_router, AppState, GatewayConfig};
//! use bizreg_upstream::{HttpSubmitClient, UpstreamConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::default();
//! let client = Arc::new(HttpSubmitClient::new(UpstreamConfig::new(
//!     config.upstream_url.clone(),
//! )));
//! let state = AppState::new(client, config);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(
//!     listener,
//!     app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod ratelimit;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use ratelimit::{Admission, RateLimiter};
pub use routes::create_router;
pub use state::AppState;
