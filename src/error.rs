//! Error types for vectorizar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for vectorizar operations.
///
/// Covers configuration validation, corpus record extraction, and model
/// persistence. Out-of-vocabulary tokens during transformation are *not*
/// errors; they are silently dropped (see [`crate::weighting::VectorSpace`]).
///
/// # Examples
///
/// ```
/// use vectorizar::error::VectorizarError;
///
/// let err = VectorizarError::InvalidParameter {
///     param: "token_min_filter".to_string(),
///     value: "1.5".to_string(),
///     constraint: "fraction in (0, 1)".to_string(),
/// };
/// assert!(err.to_string().contains("token_min_filter"));
/// ```
#[derive(Debug)]
pub enum VectorizarError {
    /// Invalid or unsupported configuration value.
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A required field was absent from a corpus record.
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for VectorizarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorizarError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter: {param} = {value}, expected {constraint}"
                )
            }
            VectorizarError::MissingField { field } => {
                write!(f, "Missing field in record: {field}")
            }
            VectorizarError::Io(e) => write!(f, "I/O error: {e}"),
            VectorizarError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            VectorizarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for VectorizarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VectorizarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VectorizarError {
    fn from(err: std::io::Error) -> Self {
        VectorizarError::Io(err)
    }
}

impl From<&str> for VectorizarError {
    fn from(msg: &str) -> Self {
        VectorizarError::Other(msg.to_string())
    }
}

impl From<String> for VectorizarError {
    fn from(msg: String) -> Self {
        VectorizarError::Other(msg)
    }
}

impl VectorizarError {
    /// Create an invalid-parameter error with descriptive context.
    #[must_use]
    pub fn invalid_parameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create a missing-field error.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, VectorizarError>;
