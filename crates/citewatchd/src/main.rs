//! Command line interface and poll daemon for `citewatch`.
//!
//! The binary wires the `citewatch` library to a Maildir and a SQLite file:
//! - `init` writes a configuration and creates the database
//! - `once` processes the unread alerts currently in the mailbox
//! - `run` keeps polling until interrupted
//! - `status` shows what has been collected so far
//!
//! # Usage
//!
//! ```bash
//! # Point citewatch at the Maildir your alerts are delivered to
//! citewatch init --maildir-path ~/Maildir/scholar
//!
//! # Process whatever is waiting
//! citewatch once
//!
//! # Poll forever, logging to the configured log directory
//! citewatch -vv run
//! ```
//!
//! Every command accepts `--config <path>` to use a configuration file other than
//! `~/.citewatch/config.toml`, and `-v` (repeatable) for more logging.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use citewatch::{
  config::{Config, CONFIG_FILE},
  error::CitewatchError,
  extract::Extractor,
  mailbox::MaildirMailbox,
  prelude::*,
  processor::{AlertProcessor, PassSummary},
  store::RecordStore,
};
use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use tracing::{debug, error, info, trace};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

pub mod commands;
pub mod error;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠️ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";
/// Branch character for tree structure
static TREE_BRANCH: &str = "├";
/// Leaf character for tree structure (end of branch)
static TREE_LEAF: &str = "└";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Collects publications from scholarly alert emails")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. Defaults to `~/.citewatch/config.toml`.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

impl Cli {
  /// The configuration file this invocation works with.
  fn config_path(&self) -> Result<PathBuf> {
    match &self.config {
      Some(path) => Ok(path.clone()),
      None => Ok(Config::default_path()?.join(CONFIG_FILE)),
    }
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
/// * `log_dir` - When set, events are also appended to a daily rotated file in this directory
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// The returned guard flushes the log file when dropped and must be held until exit.
fn setup_logging(verbosity: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true);

  match log_dir {
    Some(log_dir) => {
      let (file, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, "citewatch.log"));
      builder.with_writer(std::io::stdout.and(file)).init();
      Some(guard)
    },
    None => {
      builder.init();
      None
    },
  }
}

/// Entry point for the citewatch CLI
///
/// Parses arguments, sets up logging and runs the requested command.
///
/// # Errors
///
/// Returns [`CitewatchdError`] if the configuration, database or mailbox cannot be used.
/// Messages that fail individually during a pass are reported, not returned.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let config_path = cli.config_path()?;

  let result = match &cli.command {
    Commands::Init(options) => {
      let _guard = setup_logging(cli.verbose, None);
      init(&config_path, options)
    },
    Commands::Once => {
      let _guard = setup_logging(cli.verbose, None);
      once(&load_config(&config_path)?)
    },
    Commands::Run(options) => {
      let config = load_config(&config_path)?;
      std::fs::create_dir_all(&config.log_dir)?;
      let _guard = setup_logging(cli.verbose, Some(&config.log_dir));
      run(&config, options).await
    },
    Commands::Status => {
      let _guard = setup_logging(cli.verbose, None);
      status(&config_path, &load_config(&config_path)?)
    },
  };

  if let Err(e) = &result {
    eprintln!("{} {}", style(ERROR_PREFIX).red(), style(e).red());
  }
  result
}

/// Reads the configuration at `path`, pointing at `citewatch init` if there is none.
fn load_config(path: &Path) -> Result<Config> {
  if !path.exists() {
    return Err(CitewatchdError::NotInitialized(path.to_path_buf()));
  }
  Ok(Config::load(path)?)
}

/// Builds a processor over the configured database.
fn processor(config: &Config) -> Result<AlertProcessor> {
  let store = RecordStore::open(&config.database_path)?;
  let extractor = Extractor::new(config.template.clone());
  Ok(AlertProcessor::new(extractor, store, config.search_filter()))
}

/// Opens the configured Maildir, runs one pass over it and closes it again.
fn run_pass(processor: &mut AlertProcessor, config: &Config) -> Result<PassSummary> {
  let mut mailbox = MaildirMailbox::open(&config.maildir_path)?;
  let summary = processor.run_pass(&mut mailbox)?;
  mailbox.disconnect()?;
  Ok(summary)
}
