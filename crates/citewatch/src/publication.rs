//! Publication records extracted from alert messages.

use super::*;

/// A single publication announced by an alert message.
///
/// Records are built once by the [`Extractor`](crate::extract::Extractor), handed once to the
/// [`RecordStore`](crate::store::RecordStore) and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use citewatch::publication::Publication;
///
/// let publication = Publication {
///   title:             "Deep Learning for X".to_string(),
///   authors:           vec!["A. Smith".to_string(), "B. Lee".to_string()],
///   venue:             Some("Journal of Y".to_string()),
///   year:              2023,
///   article_url:       None,
///   profile_url:       None,
///   observed_at:       Utc::now(),
///   source_message_id: Some("<alert-1@scholar.google.com>".to_string()),
/// };
/// assert_eq!(publication.authors_joined(), "A. Smith,B. Lee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
  /// Visible text of the alert title, whitespace-collapsed and never empty
  pub title:             String,
  /// Author names in the order they appear in the byline
  pub authors:           Vec<String>,
  /// Journal or conference name, when the byline carries one
  pub venue:             Option<String>,
  /// Publication year, or the year of processing when the byline has none
  pub year:              i32,
  /// Outbound link to the publication itself
  pub article_url:       Option<String>,
  /// Link to the alerting scholar profile
  pub profile_url:       Option<String>,
  /// When the message was processed
  pub observed_at:       DateTime<Utc>,
  /// `Message-ID` of the originating message, if it had one
  pub source_message_id: Option<String>,
}

impl Publication {
  /// Authors serialized the way the store keys them: comma-joined, no padding.
  pub fn authors_joined(&self) -> String { self.authors.join(",") }
}

impl Display for Publication {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ({})", self.title, self.year)
  }
}
