//! Error types for the citewatch library.
//!
//! Two families of failure exist:
//! - [`CitewatchError`] covers infrastructure faults: storage, filesystem, configuration and
//!   mailbox transport.
//! - [`ExtractionFailure`] covers the reasons a single alert message could not be turned into a
//!   publication. These are expected, per-message outcomes and never abort a batch.
//!
//! # Examples
//!
//! ```
//! use citewatch::error::{CitewatchError, ExtractionFailure};
//!
//! fn describe(result: Result<(), ExtractionFailure>) -> &'static str {
//!   match result {
//!     Ok(()) => "ok",
//!     Err(ExtractionFailure::NoHtmlBody) => "plain text only",
//!     Err(ExtractionFailure::NoTitleFound) => "not an alert",
//!     Err(_) => "broken message",
//!   }
//! }
//! # assert_eq!(describe(Err(ExtractionFailure::NoTitleFound)), "not an alert");
//! ```

use thiserror::Error;

/// Error type alias used for the [`citewatch`](crate) crate.
pub type Result<T, E = CitewatchError> = core::result::Result<T, E>;

/// Infrastructure errors raised by the store, the mailbox and configuration handling.
#[derive(Error, Debug)]
pub enum CitewatchError {
  /// A SQLite operation failed.
  ///
  /// Covers I/O faults on the database file, schema errors and constraint violations other
  /// than the two deduplication keys (those are reported as
  /// [`InsertOutcome::AlreadyExists`](crate::store::InsertOutcome::AlreadyExists)).
  #[error(transparent)]
  Sqlite(#[from] rusqlite::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// The mail collaborator could not be reached or refused an operation.
  #[error("Mailbox error: {0}")]
  Mailbox(String),

  /// Configuration is missing or invalid.
  #[error("{0}")]
  Config(String),
}

/// Reasons an alert message could not be turned into a publication record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
  /// No MIME part declared `text/html`.
  #[error("No HTML body found in message")]
  NoHtmlBody,

  /// The HTML body has no alert title anchor, or the anchor has no visible text.
  #[error("No alert title found in message")]
  NoTitleFound,

  /// The MIME structure or a body encoding could not be decoded.
  #[error("Malformed message: {0}")]
  Malformed(String),

  /// Extraction aborted unexpectedly.
  #[error("Extraction fault: {0}")]
  Internal(String),
}

impl From<mailparse::MailParseError> for ExtractionFailure {
  fn from(error: mailparse::MailParseError) -> Self { Self::Malformed(error.to_string()) }
}
