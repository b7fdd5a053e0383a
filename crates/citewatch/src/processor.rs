//! One pass over the unread alerts of a mailbox.
//!
//! For every message the [`Mailbox`] returns for the configured [`SearchFilter`]:
//!
//! 1. fetch it
//! 2. extract a [`Publication`]
//! 3. offer it to the [`RecordStore`]
//! 4. flag it as read if it was stored or already known
//!
//! Any failure in those steps is confined to its message: it is reported, the message stays
//! unread for a later pass and processing moves on. Only a failing search aborts the pass.

use std::panic::{self, AssertUnwindSafe};

use crate::{
  extract::Extractor,
  mailbox::{Mailbox, SearchFilter},
  report::{Reporter, TracingReporter},
  store::{InsertOutcome, RecordStore},
};

use super::*;

/// Why a single message could not be fully processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemFailure {
  /// The message could not be fetched from the mailbox.
  #[error("fetch failed: {0}")]
  Fetch(String),
  /// The message is not a usable alert.
  #[error("extraction failed: {0}")]
  Extraction(ExtractionFailure),
  /// The store rejected the publication for a reason other than a duplicate.
  #[error("storage failed: {0}")]
  Storage(String),
  /// The publication was handled but the message could not be flagged as read.
  #[error("mark read failed: {0}")]
  MarkRead(String),
}

/// Tally of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
  /// Messages that produced a new publication
  pub inserted:   usize,
  /// Messages whose publication was already stored
  pub duplicates: usize,
  /// Messages left unread, with the reason
  pub failures:   Vec<(MessageHandle, ItemFailure)>,
}

impl PassSummary {
  /// Messages the pass looked at.
  pub fn total(&self) -> usize { self.inserted + self.duplicates + self.failures.len() }
}

/// Drives extraction and storage for the messages of a mailbox.
pub struct AlertProcessor<R: Reporter = TracingReporter> {
  /// Turns messages into publications
  extractor: Extractor,
  /// Where publications end up
  store:     RecordStore,
  /// Which mailbox messages are candidates
  filter:    SearchFilter,
  /// Receives per-message outcomes
  reporter:  R,
}

impl AlertProcessor<TracingReporter> {
  /// Creates a processor that reports through `tracing`.
  pub fn new(extractor: Extractor, store: RecordStore, filter: SearchFilter) -> Self {
    Self { extractor, store, filter, reporter: TracingReporter }
  }
}

impl<R: Reporter> AlertProcessor<R> {
  /// Swaps the reporter.
  pub fn with_reporter<T: Reporter>(self, reporter: T) -> AlertProcessor<T> {
    AlertProcessor {
      extractor: self.extractor,
      store: self.store,
      filter: self.filter,
      reporter,
    }
  }

  /// The reporter receiving per-message outcomes.
  pub fn reporter(&self) -> &R { &self.reporter }

  /// The backing store.
  pub fn store_mut(&mut self) -> &mut RecordStore { &mut self.store }

  /// Processes every message `mailbox` returns for the filter.
  ///
  /// # Errors
  ///
  /// Only if the search itself fails. Per-message failures are collected in the returned
  /// [`PassSummary`] instead.
  pub fn run_pass<M: Mailbox>(&mut self, mailbox: &mut M) -> Result<PassSummary> {
    let handles = mailbox.search(&self.filter)?;
    self.reporter.pass_started(handles.len());

    let mut summary = PassSummary::default();
    for handle in handles {
      match self.process_message(mailbox, &handle) {
        Ok(InsertOutcome::Inserted { .. }) => summary.inserted += 1,
        Ok(InsertOutcome::AlreadyExists) => summary.duplicates += 1,
        Err(failure) => summary.failures.push((handle, failure)),
      }
    }

    self.reporter.pass_finished(&summary);
    Ok(summary)
  }

  /// Fetch, extract, store and flag one message, reporting the outcome.
  fn process_message<M: Mailbox>(
    &mut self,
    mailbox: &mut M,
    handle: &MessageHandle,
  ) -> Result<InsertOutcome, ItemFailure> {
    let message = match mailbox.fetch(handle) {
      Ok(message) => message,
      Err(e) => return Err(self.fail(handle, None, ItemFailure::Fetch(e.to_string()))),
    };

    let record = match self.extract(&message) {
      Ok(record) => record,
      Err(failure) => {
        let message_id = message.message_id();
        return Err(self.fail(handle, message_id.as_deref(), ItemFailure::Extraction(failure)));
      },
    };
    let message_id = record.source_message_id.as_deref();

    let outcome = match self.store.insert_if_new(&record) {
      Ok(outcome) => outcome,
      Err(e) => return Err(self.fail(handle, message_id, ItemFailure::Storage(e.to_string()))),
    };
    match outcome {
      InsertOutcome::Inserted { id } => self.reporter.stored(handle, &record, id),
      InsertOutcome::AlreadyExists => self.reporter.duplicate(handle, &record),
    }

    if let Err(e) = mailbox.mark_read(handle) {
      return Err(self.fail(handle, message_id, ItemFailure::MarkRead(e.to_string())));
    }
    Ok(outcome)
  }

  /// Runs the extractor, turning a panic into [`ExtractionFailure::Internal`].
  fn extract(&self, message: &RawMessage) -> Result<Publication, ExtractionFailure> {
    panic::catch_unwind(AssertUnwindSafe(|| self.extractor.extract(message))).unwrap_or_else(
      |payload| {
        let reason = payload
          .downcast_ref::<&str>()
          .map(ToString::to_string)
          .or_else(|| payload.downcast_ref::<String>().cloned())
          .unwrap_or_else(|| "extractor panicked".to_string());
        Err(ExtractionFailure::Internal(reason))
      },
    )
  }

  /// Reports `failure` and hands it back.
  fn fail(
    &self,
    handle: &MessageHandle,
    message_id: Option<&str>,
    failure: ItemFailure,
  ) -> ItemFailure {
    self.reporter.failed(handle, message_id, &failure);
    failure
  }
}
