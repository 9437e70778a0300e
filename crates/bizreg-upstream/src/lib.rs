//! Upstream HTTP client and idempotency cache for the bizreg gateway.
//!
//! This crate owns every outbound concern of the gateway:
//!
//! - **`SubmitClient`**: the trait seam the gateway calls through, allowing
//!   mock implementations in tests
//! - **`HttpSubmitClient`**: the reqwest implementation with per-attempt
//!   timeouts, linear backoff, and a bounded retry budget for transport
//!   failures
//! - **`IdempotencyCache`**: a volatile token-to-outcome cache that lets a
//!   retried duplicate submission replay its original outcome instead of
//!   re-contacting the upstream service
//!
//! Only transport-level failures are retried. Any received HTTP response,
//! whatever its status code, ends the attempt loop.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod idempotency;

pub use client::{
    Address, ContactInfo, HttpSubmitClient, SubmitClient, SubmitPayload, UpstreamConfig,
    UpstreamOutcome, DEFAULT_UPSTREAM_URL,
};
pub use error::{Result, UpstreamError};
pub use idempotency::IdempotencyCache;
