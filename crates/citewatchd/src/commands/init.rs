//! Module for setting up a citewatch installation

use super::*;

/// Options for [`Commands::Init`]; anything left out keeps its default.
#[derive(Args, Clone)]
pub struct InitOptions {
  /// Where to keep the publication database
  #[arg(long)]
  pub database_path: Option<PathBuf>,
  /// Maildir the alert emails are delivered to
  #[arg(long)]
  pub maildir_path:  Option<PathBuf>,
  /// Directory for the daemon's log files
  #[arg(long)]
  pub log_dir:       Option<PathBuf>,
  /// Only process messages from this sender
  #[arg(long)]
  pub sender:        Option<String>,
  /// Replace an existing configuration
  #[arg(long, action = ArgAction::SetTrue)]
  pub force:         bool,
}

/// Function for the [`Commands::Init`] in the CLI.
pub fn init(config_path: &Path, options: &InitOptions) -> Result<()> {
  if config_path.exists() && !options.force {
    return Err(CitewatchdError::AlreadyInitialized(config_path.to_path_buf()));
  }

  let mut config = Config::default();
  if let Some(database_path) = &options.database_path {
    config = config.with_database_path(database_path);
  }
  if let Some(maildir_path) = &options.maildir_path {
    config = config.with_maildir_path(maildir_path);
  }
  if let Some(log_dir) = &options.log_dir {
    config = config.with_log_dir(log_dir);
  }
  if let Some(sender) = &options.sender {
    config = config.with_sender(sender);
  }

  RecordStore::open(&config.database_path)?;
  std::fs::create_dir_all(&config.maildir_path)?;
  MaildirMailbox::open(&config.maildir_path)?.disconnect()?;
  config.save(config_path)?;
  debug!(?config, "Initialized citewatch");

  println!("{} Created citewatch configuration", style(SUCCESS_PREFIX).green());
  println!("   Config:   {}", style(config_path.display()).yellow());
  println!("   Database: {}", style(config.database_path.display()).yellow());
  println!("   Maildir:  {}", style(config.maildir_path.display()).yellow());
  println!("   Sender:   {}", style(&config.sender).yellow());
  Ok(())
}
