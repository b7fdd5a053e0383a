use super::*;

pub mod init;
pub mod once;
pub mod run;
pub mod status;

pub use init::{init, InitOptions};
pub use once::{once, print_summary};
pub use run::{run, RunOptions};
pub use status::status;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a configuration file and create the database
  Init(InitOptions),

  /// Process the unread alerts in the mailbox once and exit
  Once,

  /// Poll the mailbox until interrupted
  Run(RunOptions),

  /// Show where data lives and how much has been collected
  Status,
}
