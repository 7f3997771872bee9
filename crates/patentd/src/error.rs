//! Errors surfaced by the `patent` binary.

use thiserror::Error;

/// Error type alias used for the binary.
pub type Result<T> = core::result::Result<T, PatentdError>;

/// Everything that can end a run early.
#[derive(Error, Debug)]
pub enum PatentdError {
  /// Search, download or configuration failure from the library
  #[error(transparent)]
  Patent(#[from] patent::error::PatentError),

  /// Terminal or log file I/O failure
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Prompt failure in interactive mode
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// The logging subscriber could not be installed
  #[error("Failed to set up logging: {0}")]
  Logging(String),
}
