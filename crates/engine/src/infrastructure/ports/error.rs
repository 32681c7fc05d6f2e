//! Error types for port operations.

/// State store errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Storage I/O failed - includes operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Storage error with operation context.
    pub fn storage(operation: &'static str, message: impl ToString) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Failures talking to the dialogue oracle.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OracleError {
    /// The oracle answered with a non-success status.
    #[error("Oracle returned status {status}")]
    Upstream { status: u16 },
    /// The request never completed (connect, timeout, body read).
    #[error("Oracle request failed: {0}")]
    RequestFailed(String),
    /// The body could not be decoded.
    #[error("Invalid oracle response: {0}")]
    InvalidResponse(String),
}

/// Failures of the upstream text generator used by the oracle proxy.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
    #[error("Upstream error {status}")]
    Upstream { status: u16, detail: String },
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_carries_operation() {
        let err = RepoError::storage("save", "disk full");
        assert_eq!(err.to_string(), "Storage error in save: disk full");
    }

    #[test]
    fn upstream_error_mentions_status() {
        let err = OracleError::Upstream { status: 503 };
        assert!(err.to_string().contains("503"));
    }
}
