/*!
 * Error types for the netflix-subs application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur during subtitle parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timecode did not match `HH:MM:SS,mmm`
    #[error("Malformed timecode: '{0}'")]
    MalformedTimecode(String),

    /// A block could not be turned into a cue and was dropped
    #[error("Malformed subtitle block starting at '{first_line}': {reason}")]
    MalformedBlock {
        /// First line of the dropped block
        first_line: String,
        /// Why the block was rejected
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the configuration layer
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Missing or inconsistent arguments
    #[error("Usage error: {0}")]
    Usage(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
