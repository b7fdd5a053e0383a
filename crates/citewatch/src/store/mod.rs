//! Deduplicating SQLite storage for publications.
//!
//! The store is append-only. A publication is new unless either of two keys is already
//! present:
//! - its source message id (in `publications` or in `processed_messages`)
//! - the triple of title, comma-joined authors and year
//!
//! Each successful insert writes the publication row and the processed-message marker in one
//! transaction, so neither can exist without the other.
//!
//! # Examples
//!
//! ```no_run
//! # use citewatch::{publication::Publication, store::{InsertOutcome, RecordStore}};
//! # fn example(publication: Publication) -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = RecordStore::open("alerts.db")?;
//! match store.insert_if_new(&publication)? {
//!   InsertOutcome::Inserted { id } => println!("stored as #{id}"),
//!   InsertOutcome::AlreadyExists => println!("seen before"),
//! }
//! # Ok(())
//! # }
//! ```

use rusqlite::Connection;

use super::*;

pub mod instruction;
#[cfg(test)] mod tests;

pub use self::instruction::*;

/// Handle to the publication database.
pub struct RecordStore {
  /// SQLite connection, owned exclusively for the lifetime of the store
  conn: Connection,
}

impl RecordStore {
  /// Opens an existing store or creates a new one at `path`.
  ///
  /// Missing parent directories are created and the schema is applied idempotently.
  ///
  /// # Errors
  ///
  /// Returns [`CitewatchError::Path`] if the directory cannot be created and
  /// [`CitewatchError::Sqlite`] if the database cannot be opened or initialized.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }
    debug!(path = %path.display(), "Opening record store");
    Self::initialize(Connection::open(path)?)
  }

  /// Opens a throwaway store that lives only as long as the handle.
  pub fn open_in_memory() -> Result<Self> { Self::initialize(Connection::open_in_memory()?) }

  /// Applies the schema to a fresh connection.
  fn initialize(conn: Connection) -> Result<Self> {
    conn
      .execute_batch(include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/migrations/init.sql")))?;
    Ok(Self { conn })
  }

  /// Returns the default path for the database file.
  ///
  /// - On Unix: `~/.local/share/citewatch/citewatch.db`
  /// - On macOS: `~/Library/Application Support/citewatch/citewatch.db`
  /// - On Windows: `%APPDATA%\citewatch\citewatch.db`
  /// - Fallback: `./citewatch/citewatch.db`
  pub fn default_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("citewatch").join("citewatch.db")
  }

  /// Stores `record` unless it duplicates an existing publication.
  ///
  /// Safe to call repeatedly with the same record: every call after the first success reports
  /// [`InsertOutcome::AlreadyExists`] and changes nothing.
  ///
  /// # Errors
  ///
  /// Any storage fault other than a duplicate key. The transaction is rolled back and the store
  /// is left as it was.
  pub fn insert_if_new(&mut self, record: &Publication) -> Result<InsertOutcome> {
    InsertIfNew::new(record).execute(self)
  }

  /// Number of stored publications.
  pub fn publication_count(&mut self) -> Result<u64> { Count::Publications.execute(self) }

  /// Number of processed-message markers.
  pub fn marker_count(&mut self) -> Result<u64> { Count::Markers.execute(self) }

  /// Raw connection, for tests that need to break the schema.
  #[cfg(test)]
  pub(crate) fn connection(&self) -> &Connection { &self.conn }

  /// Whether a marker exists for `message_id`.
  pub fn is_processed(&mut self, message_id: &str) -> Result<bool> {
    Ok(self.conn.query_row(
      "SELECT EXISTS(SELECT 1 FROM processed_messages WHERE message_id = ?1)",
      [message_id],
      |row| row.get(0),
    )?)
  }
}
