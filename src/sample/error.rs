// Centralized error handling module
// Every failure carries the file or expression it concerns plus a suggestion line

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sampled hashing
#[derive(Debug, Error)]
pub enum SampleError {
    /// The size expression could not be turned into a usable window width
    #[error("Invalid sample size '{spec}': {reason}\nSuggestion: Use a percentage (\"1%\"), a byte count (\"512\") or a unit suffix (KB, KiB, MB, MiB, GB, GiB)")]
    InvalidSizeSpec { spec: String, reason: String },

    /// The requested windows cannot fit in the file
    #[error("Sample range too large: {count} samples of {width} bytes need {needed} bytes, file has {file_len}\nSuggestion: Lower --size or --count")]
    RangeTooLarge {
        width: u64,
        count: u64,
        needed: u128,
        file_len: u64,
    },

    /// Fewer than two samples requested; head and tail are always sampled
    #[error("Invalid sample count {count}: at least 2 samples are required\nSuggestion: Pass --count 2 or more")]
    InvalidSampleCount { count: u64 },

    #[error("Unsupported hash algorithm: {algorithm}\nSuggestion: Use --list to see available algorithms")]
    UnsupportedAlgorithm { algorithm: String },

    /// Opening, seeking or reading the file failed
    #[error("Cannot read {path} while {operation}: {source}\nSuggestion: Check that the file exists and is readable")]
    FileUnreadable {
        path: PathBuf,
        operation: String,
        #[source]
        source: io::Error,
    },

    /// Configuration file or option error
    #[error("Configuration error: {message}\nSuggestion: Run with --help to see usage information")]
    Config { message: String },

    /// Wildcard pattern could not be expanded
    #[error("Invalid file pattern: {message}\nSuggestion: Quote the pattern or check that matching files exist")]
    InvalidPattern { message: String },
}

impl SampleError {
    /// Build a `FileUnreadable` error for the given path and operation
    pub fn unreadable(path: impl Into<PathBuf>, operation: &str, source: io::Error) -> Self {
        SampleError::FileUnreadable {
            path: path.into(),
            operation: operation.to_string(),
            source,
        }
    }

    pub fn invalid_size(spec: &str, reason: impl Into<String>) -> Self {
        SampleError::InvalidSizeSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        SampleError::Config {
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole batch rather than a single file
    ///
    /// Per-file problems (unreadable file, windows that do not fit, a size that
    /// resolves to nothing for this particular file) are reported and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SampleError::UnsupportedAlgorithm { .. }
                | SampleError::InvalidSampleCount { .. }
                | SampleError::Config { .. }
                | SampleError::InvalidPattern { .. }
        )
    }

    /// Short machine-friendly name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            SampleError::InvalidSizeSpec { .. } => "InvalidSizeSpec",
            SampleError::RangeTooLarge { .. } => "RangeTooLarge",
            SampleError::InvalidSampleCount { .. } => "InvalidSampleCount",
            SampleError::UnsupportedAlgorithm { .. } => "UnsupportedAlgorithm",
            SampleError::FileUnreadable { .. } => "FileUnreadable",
            SampleError::Config { .. } => "Config",
            SampleError::InvalidPattern { .. } => "InvalidPattern",
        }
    }
}

pub type Result<T> = std::result::Result<T, SampleError>;
