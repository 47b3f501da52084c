//! Error types for calstats-core
//!
//! A malformed event aborts aggregation outright (no partial statistics);
//! transport failures are kept distinct so frontends can present them as
//! transient and keep showing the previous results.

use thiserror::Error;

/// Core error type for calstats operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // Data integrity
    // ===================
    #[error("event '{name}' has no duration")]
    UndefinedDuration { name: String },

    #[error("event '{name}' references tag {tag} but the batch has {len} tags")]
    UnknownTag { name: String, tag: u32, len: usize },

    // ===================
    // Transport
    // ===================
    #[error("calendar request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("calendar service returned {status}: {message}")]
    Rpc { status: u16, message: String },
}

impl CoreError {
    /// True for failures of the RPC boundary (retryable by the caller),
    /// false for corrupt response data (retrying returns the same corruption).
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::Transport(_) | CoreError::Rpc { .. })
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
