//! Error types for procedure dispatch.

use thiserror::Error;

/// Everything that can go wrong between taking a request and the procedure
/// returning.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The pool could not hand out a connection: saturated past the acquire
    /// timeout, closed, or the session could not be established.
    #[error("failed to acquire a database connection: {message}")]
    Acquire { message: String },

    /// The database rejected or faulted during the procedure call.
    #[error("procedure {procedure} failed: {message}")]
    Execution {
        procedure: &'static str,
        message: String,
    },
}

impl DispatchError {
    pub fn acquire(message: impl Into<String>) -> Self {
        DispatchError::Acquire {
            message: message.into(),
        }
    }

    pub fn execution(procedure: &'static str, message: impl Into<String>) -> Self {
        DispatchError::Execution {
            procedure,
            message: message.into(),
        }
    }

    /// Raw underlying error text, without the dispatch-level prefix.
    pub fn detail(&self) -> &str {
        match self {
            DispatchError::Acquire { message } => message,
            DispatchError::Execution { message, .. } => message,
        }
    }

    pub fn is_acquire(&self) -> bool {
        matches!(self, DispatchError::Acquire { .. })
    }
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DispatchError::acquire("pool timed out");
        assert_eq!(
            err.to_string(),
            "failed to acquire a database connection: pool timed out"
        );

        let err = DispatchError::execution("SP_LimpiarPersonas", "table is locked");
        assert_eq!(
            err.to_string(),
            "procedure SP_LimpiarPersonas failed: table is locked"
        );
    }

    #[test]
    fn detail_is_the_raw_message() {
        let err = DispatchError::execution("SP_InsertarPersonas", "Duplicate entry '7'");
        assert_eq!(err.detail(), "Duplicate entry '7'");
        assert!(!err.is_acquire());

        let err = DispatchError::acquire("Too many connections");
        assert_eq!(err.detail(), "Too many connections");
        assert!(err.is_acquire());
    }
}
