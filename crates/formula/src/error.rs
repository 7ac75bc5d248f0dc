//! Error types for the formula crate

use thiserror::Error;

/// Errors that can occur while turning labeled boxes into an expression
#[derive(Error, Debug)]
pub enum FormulaError {
    /// A recognized label does not belong to any symbol kind
    #[error("Unknown symbol: {0:?}")]
    UnknownSymbol(char),

    /// The "=" count or the left side of an equation is invalid
    #[error("Malformed equation: {0}")]
    MalformedEquation(String),

    /// A rectangle read from input has non-finite coordinates
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// An exponent was found inside an exponent
    #[error("Nested exponents are not supported")]
    NestedExponent,

    /// Parser configuration could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for formula operations
pub type FormulaResult<T> = Result<T, FormulaError>;
