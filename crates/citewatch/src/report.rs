//! Reporting of per-message outcomes.
//!
//! The [`AlertProcessor`](crate::processor::AlertProcessor) never logs on its own; it tells a
//! [`Reporter`] what happened to each message. [`TracingReporter`] forwards everything to
//! `tracing`; tests can substitute a reporter that records calls.

use crate::processor::{ItemFailure, PassSummary};

use super::*;

/// Receives the outcome of every message handled in a pass.
pub trait Reporter {
  /// A pass is about to handle `candidates` messages.
  fn pass_started(&self, _candidates: usize) {}

  /// `record` from `handle` was stored under `id`.
  fn stored(&self, handle: &MessageHandle, record: &Publication, id: i64);

  /// `record` from `handle` was already known.
  fn duplicate(&self, handle: &MessageHandle, record: &Publication);

  /// `handle` could not be processed and stays unread.
  fn failed(&self, handle: &MessageHandle, message_id: Option<&str>, failure: &ItemFailure);

  /// A pass ended.
  fn pass_finished(&self, _summary: &PassSummary) {}
}

/// A [`Reporter`] that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
  fn pass_started(&self, candidates: usize) {
    info!(candidates, "Processing unread alerts");
  }

  fn stored(&self, handle: &MessageHandle, record: &Publication, id: i64) {
    info!(%handle, id, title = %record.title, year = record.year, "Stored publication");
  }

  fn duplicate(&self, handle: &MessageHandle, record: &Publication) {
    info!(%handle, title = %record.title, "Publication already exists");
  }

  fn failed(&self, handle: &MessageHandle, message_id: Option<&str>, failure: &ItemFailure) {
    match failure {
      ItemFailure::Extraction(reason) =>
        warn!(%handle, ?message_id, %reason, "Skipping message that is not a usable alert"),
      _ => error!(%handle, ?message_id, %failure, "Failed to process message"),
    }
  }

  fn pass_finished(&self, summary: &PassSummary) {
    info!(
      inserted = summary.inserted,
      duplicates = summary.duplicates,
      failures = summary.failures.len(),
      "Finished processing alerts"
    );
  }
}
