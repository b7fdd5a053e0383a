use rusqlite::{ffi, ErrorCode};

use super::*;

/// Result of offering a publication to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
  /// The publication was new and is now stored under `id`.
  Inserted {
    /// Surrogate key of the new row
    id: i64,
  },
  /// A publication with the same message id or the same title, authors and year already
  /// exists. Nothing was written.
  AlreadyExists,
}

/// Inserts a publication and its processed marker unless either dedup key is taken.
pub struct InsertIfNew<'a> {
  /// Publication to store
  record:       &'a Publication,
  /// Timestamp written to the processed marker
  processed_at: DateTime<Utc>,
}

impl<'a> InsertIfNew<'a> {
  /// Prepares an insert of `record` whose marker is stamped with [`Publication::observed_at`].
  pub fn new(record: &'a Publication) -> Self {
    Self { record, processed_at: record.observed_at }
  }

  /// Overrides the marker timestamp.
  pub fn processed_at(mut self, processed_at: DateTime<Utc>) -> Self {
    self.processed_at = processed_at;
    self
  }
}

impl StoreInstruction for InsertIfNew<'_> {
  type Output = InsertOutcome;

  fn execute(&self, store: &mut RecordStore) -> Result<Self::Output> {
    let record = self.record;
    let authors = record.authors_joined();
    let message_id = record.source_message_id.as_deref();

    // Dropping the transaction without commit rolls it back.
    let tx = store.conn.transaction()?;

    let duplicate: bool = tx.query_row(
      "SELECT EXISTS(SELECT 1 FROM publications WHERE source_message_id = ?1)
           OR EXISTS(SELECT 1 FROM processed_messages WHERE message_id = ?1)
           OR EXISTS(SELECT 1 FROM publications
                     WHERE title = ?2 AND authors = ?3 AND year = ?4)",
      params![message_id, record.title, authors, record.year],
      |row| row.get(0),
    )?;
    if duplicate {
      debug!(title = %record.title, ?message_id, "Publication already stored");
      return Ok(InsertOutcome::AlreadyExists);
    }

    let inserted = tx
      .prepare_cached(
        "INSERT INTO publications (
                    title, authors, venue, year, url, scholar_url,
                    observed_at, source_message_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                RETURNING id",
      )?
      .query_row(
        params![
          record.title,
          authors,
          record.venue,
          record.year,
          record.article_url,
          record.profile_url,
          record.observed_at.to_rfc3339(),
          message_id,
        ],
        |row| row.get::<_, i64>(0),
      );

    let id = match inserted {
      Ok(id) => id,
      Err(e) if is_dedup_violation(&e) => {
        debug!(title = %record.title, "Publication rejected by uniqueness constraint");
        return Ok(InsertOutcome::AlreadyExists);
      },
      Err(e) => return Err(e.into()),
    };

    match message_id {
      Some(message_id) => {
        tx.prepare_cached(
          "INSERT INTO processed_messages (message_id, processed_at)
                 VALUES (?1, ?2)",
        )?
        .execute(params![message_id, self.processed_at.to_rfc3339()])?;
      },
      None => warn!(title = %record.title, "Publication has no message id, no marker written"),
    }

    tx.commit()?;
    trace!(id, title = %record.title, "Publication stored");
    Ok(InsertOutcome::Inserted { id })
  }
}

/// Whether `error` is SQLite rejecting a row on one of the two dedup keys.
fn is_dedup_violation(error: &rusqlite::Error) -> bool {
  match error {
    rusqlite::Error::SqliteFailure(e, _) =>
      e.code == ErrorCode::ConstraintViolation
        && matches!(e.extended_code, ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY),
    _ => false,
  }
}
