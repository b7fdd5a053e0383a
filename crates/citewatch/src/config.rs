//! Configuration for a citewatch installation.
//!
//! Configuration lives in a TOML file, by default `~/.citewatch/config.toml`:
//!
//! ```toml
//! database_path       = "/home/me/.local/share/citewatch/citewatch.db"
//! maildir_path        = "/home/me/Maildir"
//! log_dir             = "/home/me/.local/share/citewatch/logs"
//! sender              = "scholaralerts-noreply@google.com"
//! poll_interval_secs  = 3600
//! retry_cooldown_secs = 300
//!
//! [template]
//! title_class    = "gse_alrt_title"
//! byline_marker  = "#006621"
//! profile_marker = "scholar.google.com/citations"
//! ```
//!
//! Every key is optional; missing ones take the defaults shown by [`Config::default`].

use std::time::Duration;

use crate::{extract::AlertTemplate, mailbox::SearchFilter, store::RecordStore};

use super::*;

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Sender address of Google Scholar alert emails.
pub const DEFAULT_SENDER: &str = "scholaralerts-noreply@google.com";

/// Settings for polling, extraction and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// SQLite database holding publications
  pub database_path:       PathBuf,
  /// Maildir the alerts are delivered to
  pub maildir_path:        PathBuf,
  /// Directory for the daemon's rotating log files
  pub log_dir:             PathBuf,
  /// Only messages whose `From` contains this are processed
  pub sender:              String,
  /// Pause between successful passes
  pub poll_interval_secs:  u64,
  /// Pause after a pass failed before trying again
  pub retry_cooldown_secs: u64,
  /// Markers locating the alert fields in the HTML body
  pub template:            AlertTemplate,
}

impl Default for Config {
  fn default() -> Self {
    let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("citewatch");
    Self {
      database_path:       RecordStore::default_path(),
      maildir_path:        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join("Maildir"),
      log_dir:             data_dir.join("logs"),
      sender:              DEFAULT_SENDER.to_string(),
      poll_interval_secs:  3600,
      retry_cooldown_secs: 300,
      template:            AlertTemplate::default(),
    }
  }
}

impl Config {
  /// Default configuration directory, `~/.citewatch`.
  ///
  /// # Errors
  ///
  /// [`CitewatchError::Config`] if the home directory cannot be determined.
  pub fn default_path() -> Result<PathBuf> {
    dirs::home_dir()
      .map(|home| home.join(".citewatch"))
      .ok_or_else(|| CitewatchError::Config("Could not determine home directory".to_string()))
  }

  /// Reads a configuration file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading configuration");
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
  }

  /// Writes the configuration to `path`, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    info!(path = %path.display(), "Saved configuration");
    Ok(())
  }

  /// Sets [`Config::database_path`].
  pub fn with_database_path(mut self, database_path: &Path) -> Self {
    self.database_path = database_path.to_path_buf();
    self
  }

  /// Sets [`Config::maildir_path`].
  pub fn with_maildir_path(mut self, maildir_path: &Path) -> Self {
    self.maildir_path = maildir_path.to_path_buf();
    self
  }

  /// Sets [`Config::log_dir`].
  pub fn with_log_dir(mut self, log_dir: &Path) -> Self {
    self.log_dir = log_dir.to_path_buf();
    self
  }

  /// Sets [`Config::sender`].
  pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
    self.sender = sender.into();
    self
  }

  /// The mailbox search matching this configuration: unread messages from [`Config::sender`].
  pub fn search_filter(&self) -> SearchFilter { SearchFilter::unread_from(&self.sender) }

  /// [`Config::poll_interval_secs`] as a [`Duration`].
  pub fn poll_interval(&self) -> Duration { Duration::from_secs(self.poll_interval_secs) }

  /// [`Config::retry_cooldown_secs`] as a [`Duration`].
  pub fn retry_cooldown(&self) -> Duration { Duration::from_secs(self.retry_cooldown_secs) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[traced_test]
  #[test]
  fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf").join(CONFIG_FILE);
    let config = Config::default()
      .with_database_path(&dir.path().join("alerts.db"))
      .with_maildir_path(&dir.path().join("Maildir"))
      .with_sender("alerts@example.org");

    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
  }

  #[traced_test]
  #[test]
  fn test_partial_file_uses_defaults() {
    let config: Config = toml::from_str(
      r##"
        maildir_path = "/var/mail/alerts"
        poll_interval_secs = 60

        [template]
        byline_marker = "#1a0dab"
      "##,
    )
    .unwrap();

    assert_eq!(config.maildir_path, PathBuf::from("/var/mail/alerts"));
    assert_eq!(config.poll_interval(), Duration::from_secs(60));
    assert_eq!(config.retry_cooldown(), Duration::from_secs(300));
    assert_eq!(config.sender, DEFAULT_SENDER);
    assert_eq!(config.template.byline_marker, "#1a0dab");
    assert_eq!(config.template.title_class, "gse_alrt_title");
  }

  #[traced_test]
  #[test]
  fn test_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(&path, "poll_interval_secs = \"soon\"").unwrap();
    assert!(matches!(Config::load(&path), Err(CitewatchError::TomlDe(_))));
  }

  #[traced_test]
  #[test]
  fn test_search_filter() {
    let filter = Config::default().search_filter();
    assert!(filter.unread_only);
    assert!(filter.matches_sender("Google Scholar Alerts <ScholarAlerts-NoReply@google.com>"));
  }
}
