//! API error type: backend-reported vs transport failures.

use super::transport::TransportKind;

/// Error from one backend API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status; `message` is the `error`
    /// field of its JSON body, or a caller-supplied fallback.
    #[error("{message}")]
    Backend { message: String },

    /// The exchange itself failed (never reached the backend, timed out, or
    /// the body could not be decoded).
    #[error("transport failure ({kind:?}): {source}")]
    Transport {
        kind: TransportKind,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub(super) fn transport(source: reqwest::Error) -> Self {
        let kind = super::transport::classify(&source);
        ApiError::Transport { kind, source }
    }

    /// Transport kind, if this is a transport failure.
    pub fn transport_kind(&self) -> Option<TransportKind> {
        match self {
            ApiError::Transport { kind, .. } => Some(*kind),
            ApiError::Backend { .. } => None,
        }
    }

    /// True when the server was unreachable (connection refused, timeout).
    pub fn is_network(&self) -> bool {
        self.transport_kind().is_some_and(TransportKind::is_network)
    }
}
