use std::fs;

use mailparse::MailHeaderMap;

use super::*;

/// Separator between a Maildir unique name and its info section.
const INFO_SEPARATOR: &str = ":2,";

/// A Maildir directory (`new/`, `cur/`, `tmp/`) acting as the mail collaborator.
///
/// Message handles are Maildir unique names, i.e. file names without the `:2,<flags>` info.
/// A message is unread while it sits in `new/`, or in `cur/` without the `S` flag. Marking it
/// read moves it to `cur/` and adds `S`.
#[derive(Debug, Clone)]
pub struct MaildirMailbox {
  /// Directory holding `new/`, `cur/` and `tmp/`
  root: PathBuf,
}

impl MaildirMailbox {
  /// Opens the Maildir at `root`, creating missing `new/`, `cur/` and `tmp/` subdirectories.
  ///
  /// # Errors
  ///
  /// [`CitewatchError::Mailbox`] if `root` is not an existing directory.
  pub fn open(root: impl AsRef<Path>) -> Result<Self> {
    let root = root.as_ref();
    if !root.is_dir() {
      return Err(CitewatchError::Mailbox(format!("{} is not a directory", root.display())));
    }
    for sub in ["new", "cur", "tmp"] {
      fs::create_dir_all(root.join(sub))?;
    }
    debug!(root = %root.display(), "Opened maildir");
    Ok(Self { root: root.to_path_buf() })
  }

  /// The Maildir root.
  pub fn root(&self) -> &Path { &self.root }

  /// Every message file with its handle and whether it is unread, oldest first.
  fn entries(&self) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for folder in [Folder::New, Folder::Cur] {
      for dir_entry in fs::read_dir(self.root.join(folder.name()))? {
        let path = dir_entry?.path();
        if !path.is_file() {
          continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
          warn!(path = %path.display(), "Skipping maildir entry with a non UTF-8 name");
          continue;
        };
        let (unique, flags) = match file_name.split_once(INFO_SEPARATOR) {
          Some((unique, flags)) => (unique.to_string(), flags.to_string()),
          None => (file_name.to_string(), String::new()),
        };
        let unread = folder == Folder::New || !flags.contains('S');
        entries.push(Entry { handle: MessageHandle::new(unique), path, flags, unread });
      }
    }
    // Unique names lead with the delivery timestamp.
    entries.sort_by(|a, b| a.handle.cmp(&b.handle));
    Ok(entries)
  }

  /// The entry behind `handle`.
  fn locate(&self, handle: &MessageHandle) -> Result<Entry> {
    self
      .entries()?
      .into_iter()
      .find(|entry| &entry.handle == handle)
      .ok_or_else(|| CitewatchError::Mailbox(format!("No message with handle {handle}")))
  }

  /// `From` header of the file at `path`, if it can be read.
  fn sender_of(path: &Path) -> Option<String> {
    let bytes = match fs::read(path) {
      Ok(bytes) => bytes,
      Err(e) => {
        warn!(path = %path.display(), error = %e, "Unreadable maildir entry");
        return None;
      },
    };
    match mailparse::parse_headers(&bytes) {
      Ok((headers, _)) => headers.get_first_value("From"),
      Err(e) => {
        warn!(path = %path.display(), error = %e, "Maildir entry has malformed headers");
        None
      },
    }
  }
}

/// The two Maildir folders holding delivered messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Folder {
  /// Delivered and never looked at
  New,
  /// Seen by a mail client, flags in the file name
  Cur,
}

impl Folder {
  /// Subdirectory name under the Maildir root.
  fn name(self) -> &'static str {
    match self {
      Folder::New => "new",
      Folder::Cur => "cur",
    }
  }
}

/// A message file found in the Maildir.
#[derive(Debug)]
struct Entry {
  /// Unique name without the info section
  handle: MessageHandle,
  /// Current location of the file
  path:   PathBuf,
  /// Maildir flags after `:2,`
  flags:  String,
  /// Not yet flagged `S`
  unread: bool,
}

impl Mailbox for MaildirMailbox {
  fn search(&mut self, filter: &SearchFilter) -> Result<Vec<MessageHandle>> {
    let handles: Vec<_> = self
      .entries()?
      .into_iter()
      .filter(|entry| entry.unread || !filter.unread_only)
      .filter(|entry| Self::sender_of(&entry.path).is_some_and(|from| filter.matches_sender(&from)))
      .map(|entry| entry.handle)
      .collect();
    debug!(count = handles.len(), sender = %filter.sender, "Maildir search finished");
    Ok(handles)
  }

  fn fetch(&mut self, handle: &MessageHandle) -> Result<RawMessage> {
    let entry = self.locate(handle)?;
    Ok(RawMessage::new(entry.handle, fs::read(&entry.path)?))
  }

  fn mark_read(&mut self, handle: &MessageHandle) -> Result<()> {
    let entry = self.locate(handle)?;
    let mut flags: Vec<char> = entry.flags.chars().chain(['S']).collect();
    flags.sort_unstable();
    flags.dedup();
    let flags: String = flags.into_iter().collect();

    let target = self.root.join("cur").join(format!("{handle}{INFO_SEPARATOR}{flags}"));
    if target != entry.path {
      fs::rename(&entry.path, &target)?;
      trace!(from = %entry.path.display(), to = %target.display(), "Flagged message as seen");
    }
    Ok(())
  }

  fn disconnect(self) -> Result<()> {
    trace!(root = %self.root.display(), "Closed maildir");
    Ok(())
  }
}
