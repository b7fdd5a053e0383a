//! The mail collaborator.
//!
//! The core only needs four capabilities from a mail transport: find unread alerts, fetch one,
//! flag it as read and let go of the connection. [`Mailbox`] names exactly those, so an IMAP
//! session, a local Maildir or an in-memory fake are interchangeable.

use super::*;

mod maildir;

pub use self::maildir::MaildirMailbox;

/// Which messages a [`Mailbox::search`] should return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
  /// Substring the `From` header must contain, compared case-insensitively
  pub sender:      String,
  /// Skip messages already flagged as read
  pub unread_only: bool,
}

impl SearchFilter {
  /// Unread messages from `sender`.
  pub fn unread_from(sender: impl Into<String>) -> Self {
    Self { sender: sender.into(), unread_only: true }
  }

  /// Whether a `From` header value satisfies the sender part of the filter.
  pub fn matches_sender(&self, from: &str) -> bool {
    from.to_lowercase().contains(&self.sender.to_lowercase())
  }
}

/// A connected mail source.
///
/// Errors from any method are transport errors ([`CitewatchError::Mailbox`] or
/// [`CitewatchError::Path`]).
pub trait Mailbox {
  /// Handles of the messages matching `filter`, oldest first.
  fn search(&mut self, filter: &SearchFilter) -> Result<Vec<MessageHandle>>;

  /// Full source of the message behind `handle`.
  fn fetch(&mut self, handle: &MessageHandle) -> Result<RawMessage>;

  /// Flags the message behind `handle` as read so later searches skip it.
  fn mark_read(&mut self, handle: &MessageHandle) -> Result<()>;

  /// Ends the session.
  fn disconnect(self) -> Result<()>
  where Self: Sized;
}
