// Error types for the trend engine
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrendError {
    /// Series is empty, so no moving average can be computed
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Severity value outside NO_DATA..CRITICAL
    #[error("unknown severity: {0}")]
    UnknownSeverity(String),

    /// Scope names a project that is not in the project list
    #[error("invalid project scope: {0}")]
    InvalidProjectScope(String),
}

pub type Result<T> = std::result::Result<T, TrendError>;
