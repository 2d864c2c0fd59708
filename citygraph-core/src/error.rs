//! Typed error handling for citygraph.
//!
//! Provides structured errors that library consumers can match on,
//! with full context about what went wrong and where.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for citygraph operations.
///
/// Every failure is a precondition violation reported synchronously; nothing
/// is retried. An empty intersection is *not* an error.
#[derive(Error, Debug)]
pub enum CityGraphError {
    /// I/O error when reading the graph source
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed or truncated graph source
    #[error("Parse error in {origin}: {message}")]
    Parse {
        origin: String,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
    },

    /// Declared city count outside the accepted bound
    #[error("City count {size} is out of range (expected 1..={max})")]
    SizeOutOfRange { size: i64, max: usize },

    /// Matrix is not n rows of n entries
    #[error("Matrix is not {expected}x{expected}: {detail}")]
    NonSquare { expected: usize, detail: String },

    /// Matrix entry other than 0 or 1 (0-based coordinates)
    #[error("Invalid matrix entry {value} at ({row}, {col}); entries must be 0 or 1")]
    InvalidEntry { row: usize, col: usize, value: i64 },

    /// entry(i, j) != entry(j, i) (0-based coordinates)
    #[error("Matrix is not symmetric at ({row}, {col})")]
    AsymmetricMatrix { row: usize, col: usize },

    /// Headquarters index outside [1, city_count]
    #[error("Invalid city {label}={city}: expected a value in 1..={city_count}")]
    InvalidCity {
        label: &'static str,
        city: i64,
        city_count: usize,
    },

    /// Negative hop budget
    #[error("Invalid hop budget {hops}: must be non-negative")]
    InvalidHopBudget { hops: i64 },

    /// Both headquarters name the same city
    #[error("Headquarters K1 and K2 must differ (both are {city})")]
    IdenticalHeadquarters { city: i64 },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CityGraphError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a parse error without location.
    pub fn parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.into(),
            line: None,
        }
    }

    /// Create a parse error at a 1-indexed line.
    pub fn parse_at(origin: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.into(),
            line: Some(line),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// True for the structural failures raised by the matrix validator.
    pub fn is_matrix_structure(&self) -> bool {
        matches!(
            self,
            Self::SizeOutOfRange { .. }
                | Self::NonSquare { .. }
                | Self::InvalidEntry { .. }
                | Self::AsymmetricMatrix { .. }
        )
    }

    /// True for failures of the query parameters (as opposed to the graph).
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCity { .. }
                | Self::InvalidHopBudget { .. }
                | Self::IdenticalHeadquarters { .. }
        )
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for citygraph results.
pub type CityGraphResult<T> = Result<T, CityGraphError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> CityGraphResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> CityGraphResult<T> {
        self.map_err(|e| CityGraphError::io(path, e))
    }
}
