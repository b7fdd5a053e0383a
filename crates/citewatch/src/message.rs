//! Raw alert messages as handed over by a [`Mailbox`](crate::mailbox::Mailbox).

use mailparse::{MailHeaderMap, ParsedMail};

use super::*;

/// Transport-level handle of a message inside a mailbox.
///
/// Handles are opaque to the core; they are only ever passed back to the mailbox that produced
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageHandle(String);

impl MessageHandle {
  /// Wraps a mailbox-specific identifier.
  pub fn new(handle: impl Into<String>) -> Self { Self(handle.into()) }

  /// The underlying identifier.
  pub fn as_str(&self) -> &str { &self.0 }
}

impl Display for MessageHandle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

/// An RFC 5322 message fetched from a mailbox, not yet parsed.
#[derive(Debug, Clone)]
pub struct RawMessage {
  /// Where the message came from
  pub handle: MessageHandle,
  /// Full message source, headers included
  pub bytes:  Vec<u8>,
}

impl RawMessage {
  /// Pairs message source with its mailbox handle.
  pub fn new(handle: MessageHandle, bytes: impl Into<Vec<u8>>) -> Self {
    Self { handle, bytes: bytes.into() }
  }

  /// Reads the `Message-ID` header without parsing the body.
  ///
  /// Returns `None` when the header is missing, empty or the headers cannot be parsed.
  pub fn message_id(&self) -> Option<String> {
    let (headers, _) = mailparse::parse_headers(&self.bytes).ok()?;
    normalize_message_id(headers.get_first_value("Message-ID"))
  }
}

/// Trims a `Message-ID` value and treats blank ones as absent.
pub(crate) fn normalize_message_id(value: Option<String>) -> Option<String> {
  value.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())
}

/// Depth-first search of the MIME tree for the first `text/html` part.
///
/// A single-part message is its own only candidate.
pub(crate) fn find_html_body(mail: &ParsedMail<'_>) -> Result<Option<String>, ExtractionFailure> {
  if mail.ctype.mimetype.eq_ignore_ascii_case("text/html") {
    return Ok(Some(mail.get_body()?));
  }
  for part in &mail.subparts {
    if let Some(body) = find_html_body(part)? {
      return Ok(Some(body));
    }
  }
  Ok(None)
}
