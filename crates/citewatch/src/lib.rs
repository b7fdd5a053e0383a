//! Scholarly alert ingestion and deduplicated publication storage.
//!
//! `citewatch` turns the "new citation" / "new result" notification emails sent by
//! academic alerting services into a local, deduplicated history of publications.
//! It provides:
//!
//! - HTML alert extraction into structured [`Publication`](publication::Publication) records
//! - An idempotent SQLite store keyed by message id and by (title, authors, year)
//! - A mailbox abstraction with a Maildir implementation
//! - A per-pass processor that never lets one bad message abort a batch
//!
//! # Getting Started
//!
//! ```no_run
//! use citewatch::{
//!   extract::{AlertTemplate, Extractor},
//!   mailbox::{MaildirMailbox, SearchFilter},
//!   processor::AlertProcessor,
//!   store::RecordStore,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let store = RecordStore::open(RecordStore::default_path())?;
//!   let extractor = Extractor::new(AlertTemplate::default());
//!   let filter = SearchFilter::unread_from("scholaralerts-noreply@google.com");
//!   let mut processor = AlertProcessor::new(extractor, store, filter);
//!
//!   let mut mailbox = MaildirMailbox::open("/home/me/Maildir")?;
//!   let summary = processor.run_pass(&mut mailbox)?;
//!   println!("{} new publications", summary.inserted);
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`extract`]: alert HTML extraction
//! - [`store`]: deduplicating persistence
//! - [`mailbox`]: mail collaborator trait and Maildir backend
//! - [`processor`]: per-pass orchestration
//! - [`report`]: injectable reporting of per-message outcomes
//! - [`config`]: TOML configuration
//! - [`prelude`]: common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use chrono::{DateTime, Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod config;
pub mod error;
pub mod extract;
pub mod mailbox;
pub mod message;
pub mod processor;
pub mod publication;
pub mod report;
pub mod store;

use crate::{error::*, message::*, publication::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use citewatch::{mailbox::MaildirMailbox, prelude::*};
///
/// fn example() -> Result<(), CitewatchError> {
///   let mut mailbox = MaildirMailbox::open("Maildir")?;
///   let handles = mailbox.search(&citewatch::mailbox::SearchFilter::unread_from("alerts"))?;
///   println!("{} unread alerts", handles.len());
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    error::{CitewatchError, ExtractionFailure},
    mailbox::Mailbox,
    report::Reporter,
    store::StoreInstruction,
  };
}
