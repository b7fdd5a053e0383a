use super::*;

fn extract(name: &str) -> Result<citewatch::publication::Publication, ExtractionFailure> {
  pinned_extractor().extract(&RawMessage::new(MessageHandle::new(name), fixture(name)))
}

#[traced_test]
#[test]
fn test_quoted_printable_scholar_alert() -> TestResult<()> {
  let publication = extract("scholar_alert.eml")?;

  assert_eq!(publication.title, "Deep Learning for X");
  assert_eq!(publication.authors, vec!["A. Smith", "B. Lee"]);
  assert_eq!(publication.venue.as_deref(), Some("Journal of Y"));
  assert_eq!(publication.year, 2023);
  assert_eq!(publication.article_url.as_deref(), Some("https://example.org/paper"));
  assert_eq!(
    publication.profile_url.as_deref(),
    Some("https://scholar.google.com/citations?hl=en&user=abcDEF123&view_op=list_works")
  );
  assert_eq!(
    publication.source_message_id.as_deref(),
    Some("<0000000000007c2f1a0617d5e6b1@google.com>")
  );
  Ok(())
}

#[traced_test]
#[test]
fn test_byline_without_year_and_sloppy_markup() -> TestResult<()> {
  let publication = extract("byline_no_year.eml")?;

  assert_eq!(publication.title, "Graph Networks for Z");
  assert_eq!(publication.authors, vec!["C Park", "D Kim", "…"]);
  assert_eq!(publication.venue, None);
  assert_eq!(publication.year, 2024);
  assert_eq!(publication.article_url, None);
  assert_eq!(publication.profile_url, None);
  assert_eq!(publication.source_message_id, None);
  Ok(())
}

#[traced_test]
#[test]
fn test_non_alert_html() {
  assert_eq!(extract("no_title.eml"), Err(ExtractionFailure::NoTitleFound));
}

#[traced_test]
#[test]
fn test_plain_text_alert() {
  assert_eq!(extract("plain_only.eml"), Err(ExtractionFailure::NoHtmlBody));
}

#[traced_test]
#[test]
fn test_extracted_record_is_stored_once() -> TestResult<()> {
  let mut store = RecordStore::open_in_memory()?;
  let publication = extract("scholar_alert.eml")?;

  assert!(matches!(store.insert_if_new(&publication)?, InsertOutcome::Inserted { .. }));
  let again = extract("scholar_alert.eml")?;
  assert_eq!(store.insert_if_new(&again)?, InsertOutcome::AlreadyExists);
  assert_eq!(store.publication_count()?, 1);
  assert_eq!(store.marker_count()?, 1);
  Ok(())
}
