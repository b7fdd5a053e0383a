//! Extraction of publication records from alert messages.
//!
//! An alert message is an HTML email whose template marks three things:
//! - the title anchor, by CSS class, whose `href` is usually a tracking link carrying the real
//!   article URL in a `url=` parameter
//! - the byline `<div>`, by a colour in its `style`, reading `"Authors - Venue, Year"`
//! - links to the alerting scholar profile, by a path fragment in their `href`
//!
//! The markers are configurable through [`AlertTemplate`]. Only the title is mandatory; every
//! other field degrades to empty or absent.
//!
//! # Examples
//!
//! ```
//! use citewatch::{
//!   extract::{AlertTemplate, Extractor},
//!   message::{MessageHandle, RawMessage},
//! };
//!
//! let source = "Message-ID: <1@example>\r\n\
//!               Content-Type: text/html; charset=UTF-8\r\n\r\n\
//!               <a class=\"gse_alrt_title\" href=\"https://example.org\">A Title</a>\r\n";
//! let message = RawMessage::new(MessageHandle::new("1"), source);
//! let publication = Extractor::new(AlertTemplate::default()).extract(&message).unwrap();
//! assert_eq!(publication.title, "A Title");
//! assert!(publication.authors.is_empty());
//! ```

use mailparse::MailHeaderMap;

use super::*;

mod byline;
mod document;
mod template;

pub use self::{byline::Byline, template::AlertTemplate};
use self::document::{redirect_target, visible_text, AlertDocument};

/// Source of the processing timestamp.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Turns raw alert messages into [`Publication`] records.
///
/// Extraction has no side effects beyond reading the clock, which stamps
/// [`Publication::observed_at`] and supplies the fallback year.
pub struct Extractor {
  /// Markers locating title, byline and profile link
  template: AlertTemplate,
  /// Stamps records and supplies the fallback year
  clock:    Clock,
}

impl Extractor {
  /// Creates an extractor for `template` reading the system clock.
  pub fn new(template: AlertTemplate) -> Self { Self { template, clock: Box::new(Utc::now) } }

  /// Replaces the clock, mostly so tests can pin the fallback year.
  pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
    self.clock = Box::new(clock);
    self
  }

  /// The template this extractor matches against.
  pub fn template(&self) -> &AlertTemplate { &self.template }

  /// Extracts at most one publication from `message`.
  ///
  /// # Errors
  ///
  /// - [`ExtractionFailure::Malformed`] if the MIME structure or body encoding is broken
  /// - [`ExtractionFailure::NoHtmlBody`] if no part is `text/html`
  /// - [`ExtractionFailure::NoTitleFound`] if the title anchor is missing or blank
  pub fn extract(&self, message: &RawMessage) -> Result<Publication, ExtractionFailure> {
    let mail = mailparse::parse_mail(&message.bytes)?;
    let html = find_html_body(&mail)?.ok_or(ExtractionFailure::NoHtmlBody)?;
    let source_message_id = normalize_message_id(mail.headers.get_first_value("Message-ID"));

    let document = AlertDocument::parse(&html);

    let anchor =
      document.title_anchor(&self.template.title_class).ok_or(ExtractionFailure::NoTitleFound)?;
    let title = visible_text(anchor);
    if title.is_empty() {
      return Err(ExtractionFailure::NoTitleFound);
    }
    let article_url = anchor.value().attr("href").and_then(redirect_target);

    let observed_at = (self.clock)();
    let byline = match document.byline(&self.template.byline_marker) {
      Some(element) => Byline::parse(&visible_text(element), observed_at.year()),
      None => {
        debug!(handle = %message.handle, "Alert has no byline");
        Byline::empty(observed_at.year())
      },
    };

    let profile_url = document.profile_url(&self.template.profile_marker);

    Ok(Publication {
      title,
      authors: byline.authors,
      venue: byline.venue,
      year: byline.year,
      article_url,
      profile_url,
      observed_at,
      source_message_id,
    })
  }
}

impl std::fmt::Debug for Extractor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Extractor").field("template", &self.template).finish_non_exhaustive()
  }
}
