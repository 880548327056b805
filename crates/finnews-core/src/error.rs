//! Error types for finnews-core

use thiserror::Error;

/// Result type alias for finnews-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// A stage read a state field that no earlier stage had written
    #[error("missing state field: {0}")]
    MissingField(&'static str),

    /// Stage processing failed
    #[error("stage {stage} failed: {reason}")]
    StageFailed {
        stage: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::MissingField("sentiment").to_string(), "missing state field: sentiment");

        let err = Error::StageFailed {
            stage: "aggregator",
            reason: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "stage aggregator failed: boom");
    }
}
