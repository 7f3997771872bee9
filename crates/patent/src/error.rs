//! Error types for the patent library.
//!
//! Errors fall in three groups that the orchestration code treats differently:
//! - Search page failures ([`PatentError::Provider`], [`PatentError::Network`]) propagate to the
//!   caller, since swallowing them would look like "no more results".
//! - Document failures ([`PatentError::Fetch`], [`PatentError::InvalidDocument`],
//!   [`PatentError::Io`]) are isolated per patent by [`crate::download::fetch_if_absent`].
//! - Configuration failures surface when a component is built.
//!
//! # Examples
//!
//! ```
//! use patent::error::PatentError;
//!
//! let err = PatentError::Provider { page: 2, message: "HTTP 503".into() };
//! assert_eq!(err.to_string(), "Search page 2 could not be retrieved: HTTP 503");
//! ```

use thiserror::Error;

/// Error type alias used for the [`patent`](crate) crate.
pub type Result<T> = core::result::Result<T, PatentError>;

/// Errors that can occur while searching for and downloading patents.
#[derive(Error, Debug)]
pub enum PatentError {
  /// The provided patent number doesn't match the expected format.
  ///
  /// The string parameter carries the reason reported by the validator.
  #[error("Invalid patent number: {0}")]
  InvalidIdentifier(String),

  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A search results page could not be retrieved or understood.
  #[error("Search page {page} could not be retrieved: {message}")]
  Provider {
    /// The page that was requested
    page:    u32,
    /// What went wrong
    message: String,
  },

  /// The document for a single patent could not be downloaded.
  #[error("Download of {number} failed: {message}")]
  Fetch {
    /// The patent number being fetched
    number:  String,
    /// What went wrong
    message: String,
  },

  /// The site answered with something that is not a PDF document.
  ///
  /// Search sites commonly serve an HTML error or captcha page with a success status, so
  /// downloaded bytes are checked before they reach the archive.
  #[error("Response for {0} is not a PDF document")]
  InvalidDocument(String),

  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - Creating the archive directory fails
  /// - Writing a downloaded document fails
  /// - Reading a configuration file fails
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A JSON search response could not be parsed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A configured CSS selector is not valid.
  #[error("Invalid selector \"{0}\"")]
  Selector(String),

  /// A configured regular expression is not valid.
  #[error(transparent)]
  Regex(#[from] regex::Error),

  /// A TOML configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// Configuration is incomplete or inconsistent.
  #[error("{0}")]
  Config(String),
}
