use super::*;

fn processor(dir: &Path) -> AlertProcessor {
  let store = RecordStore::open(dir.join("db").join("citewatch.db")).unwrap();
  AlertProcessor::new(
    pinned_extractor(),
    store,
    SearchFilter::unread_from("scholaralerts-noreply@google.com"),
  )
}

#[traced_test]
#[test]
fn test_pass_over_maildir() -> TestResult<()> {
  let (mut mailbox, dir) = create_test_maildir();
  let db_dir = tempdir()?;
  deliver(dir.path(), "1715000001.alert.host", "scholar_alert.eml");
  deliver(dir.path(), "1715000002.confirm.host", "no_title.eml");
  deliver(dir.path(), "1715000003.plain.host", "plain_only.eml");
  deliver(dir.path(), "1715000004.noyear.host", "byline_no_year.eml");
  let newsletter = deliver(dir.path(), "1715000005.digest.host", "newsletter.eml");

  let mut processor = processor(db_dir.path());
  let summary = processor.run_pass(&mut mailbox)?;

  assert_eq!(summary.inserted, 2);
  assert_eq!(summary.duplicates, 0);
  assert_eq!(summary.failures, vec![
    (
      MessageHandle::new("1715000002.confirm.host"),
      ItemFailure::Extraction(ExtractionFailure::NoTitleFound)
    ),
    (
      MessageHandle::new("1715000003.plain.host"),
      ItemFailure::Extraction(ExtractionFailure::NoHtmlBody)
    ),
  ]);

  // Stored alerts are flagged, failures stay unread, other senders are untouched.
  assert!(dir.path().join("cur/1715000001.alert.host:2,S").is_file());
  assert!(dir.path().join("cur/1715000004.noyear.host:2,S").is_file());
  assert!(dir.path().join("new/1715000002.confirm.host").is_file());
  assert!(dir.path().join("new/1715000003.plain.host").is_file());
  assert!(newsletter.is_file());

  assert_eq!(processor.store_mut().publication_count()?, 2);
  assert_eq!(processor.store_mut().marker_count()?, 1);
  assert!(processor.store_mut().is_processed("<0000000000007c2f1a0617d5e6b1@google.com>")?);

  mailbox.disconnect()?;
  Ok(())
}

#[traced_test]
#[test]
fn test_redelivered_alert_is_absorbed() -> TestResult<()> {
  let (mut mailbox, dir) = create_test_maildir();
  let db_dir = tempdir()?;
  deliver(dir.path(), "1715000001.alert.host", "scholar_alert.eml");

  let mut processor = processor(db_dir.path());
  assert_eq!(processor.run_pass(&mut mailbox)?.inserted, 1);

  // The same alert delivered again, e.g. after a mail client moved it back to the inbox.
  deliver(dir.path(), "1715000009.again.host", "scholar_alert.eml");
  let summary = processor.run_pass(&mut mailbox)?;
  assert_eq!(summary.inserted, 0);
  assert_eq!(summary.duplicates, 1);
  assert!(dir.path().join("cur/1715000009.again.host:2,S").is_file());

  assert!(processor.run_pass(&mut mailbox)?.failures.is_empty());
  assert_eq!(processor.store_mut().publication_count()?, 1);
  Ok(())
}

#[traced_test]
#[test]
fn test_store_survives_restart() -> TestResult<()> {
  let (mut mailbox, dir) = create_test_maildir();
  let db_dir = tempdir()?;
  deliver(dir.path(), "1715000001.alert.host", "scholar_alert.eml");
  processor(db_dir.path()).run_pass(&mut mailbox)?;

  // Flag lost, e.g. mailbox restored from backup.
  fs::rename(
    dir.path().join("cur/1715000001.alert.host:2,S"),
    dir.path().join("new/1715000001.alert.host"),
  )?;

  let mut restarted = processor(db_dir.path());
  let summary = restarted.run_pass(&mut mailbox)?;
  assert_eq!(summary.duplicates, 1);
  assert_eq!(restarted.store_mut().publication_count()?, 1);
  Ok(())
}
