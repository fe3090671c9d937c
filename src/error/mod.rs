//! Error types for cdchunk.
//!
//! This module defines the error type used throughout the crate.
//!
//! - [`ChunkError`] - Represents all possible errors during configuration
//!   and chunking

use std::fmt;

/// Errors that can occur during configuration and chunking operations.
///
/// `ChunkError` represents all possible error conditions that may occur
/// while loading a configuration file, constructing a chunker, or chunking
/// data from a source.
///
/// # Variants
///
/// - [`ChunkError::Io`] - An I/O error occurred while reading input data
/// - [`ChunkError::MissingKey`] - A required configuration key is absent
/// - [`ChunkError::InvalidValue`] - A configuration value could not be parsed
/// - [`ChunkError::InvalidLine`] - A configuration line is malformed
/// - [`ChunkError::InvalidConfig`] - Chunking parameters are inconsistent
///
/// # Example
///
/// ```
/// use cdchunk::ChunkError;
///
/// fn handle_error(err: ChunkError) {
///     match err {
///         ChunkError::Io(io_err) => eprintln!("I/O error: {}", io_err),
///         ChunkError::MissingKey { key } => eprintln!("missing key: {}", key),
///         other => eprintln!("{}", other),
///     }
/// }
/// ```
#[derive(Debug)]
pub enum ChunkError {
    /// An I/O error occurred while reading input data.
    ///
    /// The stream stops at the point of failure; chunks already appended to
    /// the sink remain valid.
    Io(std::io::Error),

    /// A required configuration key is absent.
    MissingKey {
        /// The key that was requested.
        key: &'static str,
    },

    /// A configuration value could not be parsed or is outside the
    /// recognized set.
    InvalidValue {
        /// The key whose value was rejected.
        key: &'static str,
        /// The offending value as it appeared in the file.
        value: String,
    },

    /// A configuration line is neither blank, a comment, nor `key=value`.
    InvalidLine {
        /// 1-based line number within the configuration file.
        line: usize,
    },

    /// Chunking parameters are inconsistent.
    ///
    /// Raised at chunker construction, for example when the minimum block
    /// size exceeds the average, the average exceeds the maximum, or a
    /// window or block size is zero.
    InvalidConfig {
        /// Description of what was inconsistent.
        message: &'static str,
    },
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::Io(e) => write!(f, "io error: {}", e),
            ChunkError::MissingKey { key } => {
                write!(f, "configuration does not specify '{}'", key)
            }
            ChunkError::InvalidValue { key, value } => {
                write!(f, "invalid value '{}' for '{}'", value, key)
            }
            ChunkError::InvalidLine { line } => {
                write!(f, "malformed configuration line {}", line)
            }
            ChunkError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChunkError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChunkError {
    fn from(e: std::io::Error) -> Self {
        ChunkError::Io(e)
    }
}
