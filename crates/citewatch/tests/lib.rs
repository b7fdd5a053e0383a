use std::{
  error::Error,
  fs,
  path::{Path, PathBuf},
};

use chrono::{TimeZone, Utc};
use citewatch::{
  extract::{AlertTemplate, Extractor},
  mailbox::{MaildirMailbox, SearchFilter},
  message::{MessageHandle, RawMessage},
  prelude::*,
  processor::{AlertProcessor, ItemFailure},
  store::{InsertOutcome, RecordStore},
};
use tempfile::{tempdir, TempDir};
use tracing_test::traced_test;

mod workflows;

pub type TestResult<T> = Result<T, Box<dyn Error>>;

/// Raw bytes of a message under `tests/data`.
pub fn fixture(name: &str) -> Vec<u8> {
  fs::read(Path::new("tests/data").join(name)).expect("Failed to read fixture")
}

/// Extractor with a pinned clock of 2024-05-01T12:00:00Z.
pub fn pinned_extractor() -> Extractor {
  Extractor::new(AlertTemplate::default())
    .with_clock(|| Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
}

/// An empty Maildir in a temporary directory.
pub fn create_test_maildir() -> (MaildirMailbox, TempDir) {
  let dir = tempdir().unwrap();
  let mailbox = MaildirMailbox::open(dir.path()).unwrap();
  (mailbox, dir)
}

/// Drops fixture `name` into `new/` under the unique name `unique`.
pub fn deliver(maildir: &Path, unique: &str, name: &str) -> PathBuf {
  let path = maildir.join("new").join(unique);
  fs::write(&path, fixture(name)).unwrap();
  path
}
