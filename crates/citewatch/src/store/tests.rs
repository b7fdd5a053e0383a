use chrono::TimeZone;

use super::*;

/// Helper function to set up a test store on disk
fn setup_test_store() -> (RecordStore, PathBuf, tempfile::TempDir) {
  let dir = tempdir().unwrap();
  let path = dir.path().join("nested").join("test.db");
  let store = RecordStore::open(&path).unwrap();
  (store, path, dir)
}

fn publication(message_id: Option<&str>) -> Publication {
  Publication {
    title:             "Deep Learning for X".to_string(),
    authors:           vec!["A. Smith".to_string(), "B. Lee".to_string()],
    venue:             Some("Journal of Y".to_string()),
    year:              2023,
    article_url:       Some("https://example.org/paper".to_string()),
    profile_url:       None,
    observed_at:       Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    source_message_id: message_id.map(ToString::to_string),
  }
}

#[traced_test]
#[test]
fn test_store_creation() {
  let (_store, path, _dir) = setup_test_store();
  assert!(path.exists());
}

#[traced_test]
#[test]
fn test_default_path() {
  let path = RecordStore::default_path();
  assert!(path.ends_with("citewatch/citewatch.db") || path.ends_with("citewatch\\citewatch.db"));
}

#[traced_test]
#[test]
fn test_insert_then_duplicate() {
  let (mut store, _path, _dir) = setup_test_store();
  let record = publication(Some("<m1@scholar>"));

  let first = store.insert_if_new(&record).unwrap();
  assert!(matches!(first, InsertOutcome::Inserted { id } if id > 0));

  assert_eq!(store.insert_if_new(&record).unwrap(), InsertOutcome::AlreadyExists);
  assert_eq!(store.insert_if_new(&record).unwrap(), InsertOutcome::AlreadyExists);
  assert_eq!(store.publication_count().unwrap(), 1);
  assert_eq!(store.marker_count().unwrap(), 1);
  assert!(store.is_processed("<m1@scholar>").unwrap());
}

#[traced_test]
#[test]
fn test_duplicate_by_triple() {
  let mut store = RecordStore::open_in_memory().unwrap();
  store.insert_if_new(&publication(Some("<m1@scholar>"))).unwrap();

  let mut resent = publication(Some("<m2@scholar>"));
  resent.venue = None;
  resent.article_url = Some("https://mirror.example.org/paper".to_string());

  assert_eq!(store.insert_if_new(&resent).unwrap(), InsertOutcome::AlreadyExists);
  assert_eq!(store.publication_count().unwrap(), 1);
  assert!(!store.is_processed("<m2@scholar>").unwrap());
}

#[traced_test]
#[test]
fn test_duplicate_by_message_id() {
  let mut store = RecordStore::open_in_memory().unwrap();
  store.insert_if_new(&publication(Some("<m1@scholar>"))).unwrap();

  let mut other = publication(Some("<m1@scholar>"));
  other.title = "A Different Paper".to_string();

  assert_eq!(store.insert_if_new(&other).unwrap(), InsertOutcome::AlreadyExists);
  assert_eq!(store.publication_count().unwrap(), 1);
}

#[traced_test]
#[test]
fn test_authors_order_matters_for_triple() {
  let mut store = RecordStore::open_in_memory().unwrap();
  store.insert_if_new(&publication(Some("<m1@scholar>"))).unwrap();

  let mut swapped = publication(Some("<m2@scholar>"));
  swapped.authors.reverse();
  assert!(matches!(store.insert_if_new(&swapped).unwrap(), InsertOutcome::Inserted { .. }));
  assert_eq!(store.publication_count().unwrap(), 2);
}

#[traced_test]
#[test]
fn test_missing_message_id_dedups_by_triple_only() {
  let mut store = RecordStore::open_in_memory().unwrap();
  assert!(matches!(store.insert_if_new(&publication(None)).unwrap(), InsertOutcome::Inserted { .. }));
  assert_eq!(store.insert_if_new(&publication(None)).unwrap(), InsertOutcome::AlreadyExists);

  let mut other = publication(None);
  other.year = 2024;
  assert!(matches!(store.insert_if_new(&other).unwrap(), InsertOutcome::Inserted { .. }));

  assert_eq!(store.publication_count().unwrap(), 2);
  assert_eq!(store.marker_count().unwrap(), 0);
  assert!(logs_contain("no marker written"));
}

#[traced_test]
#[test]
fn test_existing_marker_blocks_insert() {
  let mut store = RecordStore::open_in_memory().unwrap();
  store
    .conn
    .execute(
      "INSERT INTO processed_messages (message_id, processed_at) VALUES ('<m1@scholar>', 'x')",
      [],
    )
    .unwrap();

  assert_eq!(
    store.insert_if_new(&publication(Some("<m1@scholar>"))).unwrap(),
    InsertOutcome::AlreadyExists
  );
  assert_eq!(store.publication_count().unwrap(), 0);
}

#[traced_test]
#[test]
fn test_failed_marker_rolls_back_publication() {
  let mut store = RecordStore::open_in_memory().unwrap();
  store
    .conn
    .execute_batch(
      "DROP TABLE processed_messages;
       CREATE TABLE processed_messages (
           message_id   TEXT PRIMARY KEY,
           processed_at TEXT NOT NULL CHECK (length(processed_at) < 5)
       );",
    )
    .unwrap();

  let result = store.insert_if_new(&publication(Some("<m1@scholar>")));
  assert!(matches!(result, Err(CitewatchError::Sqlite(_))));
  assert_eq!(store.publication_count().unwrap(), 0);
}

#[traced_test]
#[test]
fn test_stored_columns() {
  let mut store = RecordStore::open_in_memory().unwrap();
  let record = publication(Some("<m1@scholar>"));
  let processed_at = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();
  InsertIfNew::new(&record).processed_at(processed_at).execute(&mut store).unwrap();

  let (authors, venue, url, observed_at): (String, Option<String>, Option<String>, String) = store
    .conn
    .query_row(
      "SELECT authors, venue, url, observed_at FROM publications WHERE source_message_id = ?1",
      ["<m1@scholar>"],
      |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
    )
    .unwrap();
  assert_eq!(authors, "A. Smith,B. Lee");
  assert_eq!(venue.as_deref(), Some("Journal of Y"));
  assert_eq!(url.as_deref(), Some("https://example.org/paper"));
  assert_eq!(observed_at, record.observed_at.to_rfc3339());

  let marker_time: String = store
    .conn
    .query_row("SELECT processed_at FROM processed_messages", [], |row| row.get(0))
    .unwrap();
  assert_eq!(marker_time, processed_at.to_rfc3339());
}

#[traced_test]
#[test]
fn test_reopen_keeps_rows() {
  let (mut store, path, _dir) = setup_test_store();
  store.insert_if_new(&publication(Some("<m1@scholar>"))).unwrap();
  drop(store);

  let mut store = RecordStore::open(&path).unwrap();
  assert_eq!(store.publication_count().unwrap(), 1);
  assert_eq!(
    store.insert_if_new(&publication(Some("<m1@scholar>"))).unwrap(),
    InsertOutcome::AlreadyExists
  );
}

#[traced_test]
#[test]
fn test_marker_uses_observed_time() {
  let mut store = RecordStore::open_in_memory().unwrap();
  let record = publication(Some("<m1@scholar>"));
  store.insert_if_new(&record).unwrap();

  let marker_time: String = store
    .conn
    .query_row("SELECT processed_at FROM processed_messages", [], |row| row.get(0))
    .unwrap();
  assert_eq!(marker_time, record.observed_at.to_rfc3339());
}
