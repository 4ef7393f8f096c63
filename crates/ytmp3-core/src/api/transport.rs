//! Classify transport-level failures into typed kinds.
//!
//! The coordinator decides what to tell the user by matching on these kinds,
//! never by substring-matching error text.

/// High-level classification of a failed HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Could not reach the server (connect, DNS, reset).
    Connection,
    /// The request timed out.
    Timeout,
    /// The server answered with a non-2xx status.
    Http(u16),
    /// The response body could not be decoded as expected.
    Decode,
    /// Anything else (request build, redirect policy, ...).
    Other,
}

/// Map a reqwest error into a [`TransportKind`].
pub(super) fn classify(e: &reqwest::Error) -> TransportKind {
    if e.is_timeout() {
        return TransportKind::Timeout;
    }
    if e.is_connect() {
        return TransportKind::Connection;
    }
    if e.is_decode() {
        return TransportKind::Decode;
    }
    if let Some(status) = e.status() {
        return TransportKind::Http(status.as_u16());
    }
    // Body read failures mid-stream surface as request errors without a
    // status; treat them as connection problems so they stay retryable.
    if e.is_request() || e.is_body() {
        return TransportKind::Connection;
    }
    TransportKind::Other
}

impl TransportKind {
    /// True when the failure means the server was unreachable, as opposed to
    /// the server answering with an error.
    pub fn is_network(self) -> bool {
        matches!(self, TransportKind::Connection | TransportKind::Timeout)
    }
}
