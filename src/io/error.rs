//! Error types for corpus loading, configuration and collapse attempts

use std::fmt;
use std::path::PathBuf;

/// Main error type for all fallible operations outside a single collapse attempt
#[derive(Debug)]
pub enum AlgorithmError {
    /// Source corpus or pattern list doesn't meet algorithm requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Symbol code exceeds the vocabulary
    InvalidSymbolCode {
        /// The invalid code
        code: usize,
        /// Number of symbols in the vocabulary
        vocabulary_size: usize,
    },

    /// Symbol never seen in the training corpus
    UnknownSymbol {
        /// The offending symbol
        symbol: char,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSymbolCode {
                code,
                vocabulary_size,
            } => {
                write!(
                    f,
                    "Symbol code {code} is out of bounds (vocabulary size: {vocabulary_size})"
                )
            }
            Self::UnknownSymbol { symbol } => {
                write!(f, "Symbol {symbol:?} does not occur in the corpus")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidSourceData {
        reason: reason.to_string(),
    }
}

/// Unsatisfiable state reached during one collapse attempt
///
/// This is an expected outcome of the greedy solver. The attempt is discarded
/// and the caller may retry with a freshly populated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contradiction {
    /// A position was left with no possible symbols
    EmptyPosition {
        /// Absolute index of the first empty position
        index: usize,
        /// Collapse iteration at which it was detected
        iteration: usize,
    },

    /// A resolved position sits in a window never observed in the corpus
    UnlearnedWindow {
        /// Absolute index of the first offending position
        index: usize,
    },
}

impl Contradiction {
    /// Absolute index of the position that triggered the contradiction
    pub const fn index(&self) -> usize {
        match self {
            Self::EmptyPosition { index, .. } | Self::UnlearnedWindow { index } => *index,
        }
    }
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPosition { index, iteration } => {
                write!(
                    f,
                    "Position {index} has no possible symbols (iteration {iteration})"
                )
            }
            Self::UnlearnedWindow { index } => {
                write!(f, "Position {index} resolved into an unlearned window")
            }
        }
    }
}

impl std::error::Error for Contradiction {}
