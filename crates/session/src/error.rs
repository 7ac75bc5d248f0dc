//! Error types for the session crate

use formula::FormulaError;
use thiserror::Error;

/// Errors that can occur while driving formulas through a session
#[derive(Error, Debug)]
pub enum SessionError {
    /// Parsing the formula failed
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// A declaration's left side is not a name or a function signature
    #[error("Invalid declaration: {0}")]
    InvalidDeclaration(String),

    /// A manual correction does not have one label per box
    #[error("Expected {expected} labels, got {found}")]
    LabelCountMismatch { expected: usize, found: usize },

    /// The operation needs at least one recognized symbol
    #[error("Formula has no symbols")]
    EmptyFormula,

    /// No formula exists at this index
    #[error("No formula at index {0}")]
    UnknownFormula(usize),

    /// Recorded formulas could not be read
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::LabelCountMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "Expected 3 labels, got 2");
        assert_eq!(
            SessionError::UnknownFormula(4).to_string(),
            "No formula at index 4"
        );
    }

    #[test]
    fn test_formula_error_is_transparent() {
        let err: SessionError = FormulaError::UnknownSymbol('#').into();
        assert_eq!(err.to_string(), "Unknown symbol: '#'");
    }
}
