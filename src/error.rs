//! Error types for the notes client.

use thiserror::Error;

/// Failures talking to the remote notes API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, timeout, bad body.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status. `detail` is the server's
    /// own message when it sent one, otherwise a per-operation fallback.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("Not logged in")]
    Unauthenticated,
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ClientError::Unauthenticated => true,
            ClientError::Api { status, .. } => *status == 401,
            ClientError::Http(e) => e.status().map(|s| s.as_u16()) == Some(401),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Unauthenticated => Some(401),
        }
    }
}

/// Bulk operations that could not restore a consistent view.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Some deletes failed and the follow-up reload failed too. The local
    /// collection was left as it was before the batch.
    #[error("Failed to delete {failed} item(s), and reloading failed: {source}")]
    Reconcile {
        failed: usize,
        #[source]
        source: ClientError,
    },
}

/// Invalid startup configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Invalid API URL {url}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}
