/*!
 * Error types for the yamtwai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * - `ProviderError`: a single request to the translation service failed
 * - `ValidationError`: the run cannot start (fatal, checked before any file is touched)
 * - `FileTranslationError`: one document could not be translated (recoverable, per file)
 * - `AppError`: run-level wrapper returned by the controller
 */

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The response parsed but carried no generated text
    #[error("API response contained no choices")]
    EmptyResponse,
}

/// Errors that abort a run before any document is processed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Target language is not in the supported table
    #[error("Unsupported language code: '{0}'")]
    UnsupportedLanguage(String),

    /// The configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors for a single document. None of them stop the surrounding run.
#[derive(Error, Debug)]
pub enum FileTranslationError {
    /// The input could not be read (missing, unreadable or not UTF-8)
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A chunk failed to translate; the whole document is abandoned
    #[error("Translation of {} failed at chunk {ordinal}: {source}", path.display())]
    Translation {
        path: PathBuf,
        ordinal: usize,
        #[source]
        source: ProviderError,
    },

    /// The output directory or file could not be written
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileTranslationError {
    /// Path of the file the error refers to (input for read/translate, output for write)
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. } | Self::Translation { path, .. } | Self::Write { path, .. } => path,
        }
    }

    /// True when a read failed because the content is not valid UTF-8
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == io::ErrorKind::InvalidData)
    }

    /// True when a read failed because the file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Pre-flight validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The input tree could not be enumerated
    #[error("Cannot scan {}: {message}", path.display())]
    Discovery { path: PathBuf, message: String },

    /// A single file failed (only surfaced by single-file entry points)
    #[error("File error: {0}")]
    File(#[from] FileTranslationError),

    /// The configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}
