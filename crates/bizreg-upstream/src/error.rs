//! Error types for upstream communication.

use thiserror::Error;

/// A result type using `UpstreamError`.
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Errors that can occur while talking to the upstream service.
///
/// A received HTTP response is never an error here, whatever its status
/// code; the gateway maps status codes itself. Only a failure to complete
/// the exchange at all surfaces as `UpstreamError`.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The HTTP exchange could not be completed (timeout, connection error,
    /// or abort) after the retry budget was exhausted.
    #[error("transport failure: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_displays_detail() {
        let err = UpstreamError::Transport("connection reset".into());
        assert_eq!(err.to_string(), "transport failure: connection reset");
    }
}
