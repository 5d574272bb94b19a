//! Error types for the Robolang parser and interpreter

use thiserror::Error;

/// Robolang errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Parse errors
    /// The program text does not match the grammar
    ///
    /// **Triggered by:** Unknown keywords, malformed numbers, missing punctuation
    /// **Example:** `if(gt(fuelLeft,10){move;}` (missing `)` after the condition)
    #[error("{message}\n   @ ...{}...", render_context(.context))]
    ParseError {
        /// Error description
        message: String,
        /// Up to five tokens starting at the point of failure
        context: Vec<String>,
    },

    /// Program source could not be read
    #[error("Failed to read program {path}: {message}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O failure
        message: String,
    },

    // Runtime errors
    /// Division by zero error
    ///
    /// **Triggered by:** A `div` whose second operand evaluates to 0
    /// **Example:** `$x = div(4, 0);`
    #[error("Arithmetic error: division by zero in {expression}")]
    DivisionByZero {
        /// Rendered `div` expression that failed
        expression: String,
    },

    /// A keyword or operator reached the interpreter without a recognized case
    #[error("Unknown {kind}: {value}")]
    UnknownValue {
        /// Category of the value (action, sensor, operator, ...)
        kind: String,
        /// Offending text
        value: String,
    },

    // Resource errors
    /// The host raised the stop signal
    #[error("Execution interrupted")]
    Interrupted,

    /// Step budget exhausted
    #[error("Execution limit exceeded (max: {limit} statements)")]
    ExecutionLimitExceeded {
        /// Maximum allowed statements
        limit: u64,
    },

    /// Evaluator configuration could not be decoded
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The program itself is broken; running it again will fail the same way
    Fatal,
    /// The failure came from the host or the environment
    Recoverable,
}

impl Error {
    /// Create a parse error with the given diagnostic context
    pub fn parse(message: impl Into<String>, context: Vec<String>) -> Self {
        Error::ParseError {
            message: message.into(),
            context,
        }
    }

    /// Create an unknown-value error
    pub fn unknown(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Error::UnknownValue {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::ParseError { .. } => ErrorSeverity::Fatal,
            Error::DivisionByZero { .. } => ErrorSeverity::Fatal,
            Error::UnknownValue { .. } => ErrorSeverity::Fatal,

            Error::Io { .. } => ErrorSeverity::Recoverable,
            Error::Interrupted => ErrorSeverity::Recoverable,
            Error::ExecutionLimitExceeded { .. } => ErrorSeverity::Recoverable,
            Error::InvalidConfig(_) => ErrorSeverity::Recoverable,
        }
    }

    /// Returns true for errors raised while parsing
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::ParseError { .. })
    }
}

fn render_context(context: &[String]) -> String {
    context.iter().map(|token| format!(" {}", token)).collect()
}

/// Result type for Robolang operations
pub type Result<T> = std::result::Result<T, Error>;
