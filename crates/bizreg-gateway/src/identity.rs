//! Client identity extraction.
//!
//! The identity is a best-effort string derived from the caller's network
//! address and is used only as a rate-limit key. Clients behind a shared
//! proxy collapse to one identity; that imprecision is accepted.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Derive the client identity for a request.
///
/// The first entry of `x-forwarded-for` wins when present; otherwise the
/// peer address, otherwise `"unknown"`.
#[must_use]
pub fn client_identity(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    peer.map_or_else(|| "unknown".to_string(), |addr| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("192.0.2.1:4711".parse().unwrap())
    }

    #[test]
    fn forwarded_header_takes_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_identity(&headers, peer()), "203.0.113.9");
    }

    #[test]
    fn forwarded_entry_is_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  203.0.113.9 "));
        assert_eq!(client_identity(&headers, peer()), "203.0.113.9");
    }

    #[test]
    fn empty_forwarded_header_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(client_identity(&headers, peer()), "192.0.2.1");
    }

    #[test]
    fn no_header_uses_peer_ip() {
        assert_eq!(client_identity(&HeaderMap::new(), peer()), "192.0.2.1");
    }

    #[test]
    fn no_information_yields_unknown() {
        assert_eq!(client_identity(&HeaderMap::new(), None), "unknown");
    }
}
