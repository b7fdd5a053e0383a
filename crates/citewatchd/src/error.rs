//! Error types for the citewatch binary.

use std::path::PathBuf;

use thiserror::Error;

use super::*;

/// Errors that end a `citewatch` invocation.
#[derive(Error, Debug)]
pub enum CitewatchdError {
  /// An error from the `citewatch` library.
  #[error(transparent)]
  Citewatch(#[from] CitewatchError),

  /// A filesystem error outside the library.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// No configuration file exists yet.
  #[error("No configuration at {}. Run `citewatch init` first.", .0.display())]
  NotInitialized(PathBuf),

  /// `init` would replace an existing configuration.
  #[error("Configuration already exists at {}. Pass --force to overwrite it.", .0.display())]
  AlreadyInitialized(PathBuf),
}

/// Alias for results returned by the binary.
pub type Result<T> = core::result::Result<T, CitewatchdError>;
