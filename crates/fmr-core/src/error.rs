use thiserror::Error;

/// Top-level error type for the fmr library.
#[derive(Debug, Error)]
pub enum FmrError {
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ChainError {
    /// A stage was about to run but the working value was not a sequence.
    #[error("{operation}: need a sequence to iterate, but found {found}")]
    NotASequence {
        operation: &'static str,
        found: String,
    },

    /// The evaluation worker hung up without delivering a result, or the
    /// result was already taken.
    #[error("evaluation channel closed")]
    Disconnected,

    #[error("timed out waiting for evaluation result")]
    Timeout,
}

impl ChainError {
    pub fn not_a_sequence(operation: &'static str, found: impl Into<String>) -> Self {
        Self::NotASequence {
            operation,
            found: found.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FmrError>;
