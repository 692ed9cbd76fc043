use thiserror::Error;

/// Error taxonomy shared by all custody operations.
///
/// Everything except `Conflict` and `Internal` is terminal for the request:
/// the caller fixes the input or gives up. `Conflict` means a concurrent
/// writer won the race and the caller should re-read before retrying.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("insufficient quantity: requested {requested}, available {available}")]
    InsufficientQuantity { requested: f64, available: f64 },

    #[error("conflict: batch was modified concurrently, re-read and retry")]
    Conflict,

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Best-effort subsystem (event log) unavailable. Never propagated past
    /// the transition that triggered the append; logged and swallowed.
    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ChainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ChainError::NotFound(what.into())
    }

    pub fn forbidden(why: impl Into<String>) -> Self {
        ChainError::Forbidden(why.into())
    }

    pub fn invalid_state(why: impl Into<String>) -> Self {
        ChainError::InvalidState(why.into())
    }

    /// True when retrying without re-reading current state cannot help
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ChainError::Conflict | ChainError::Internal(_))
    }
}
