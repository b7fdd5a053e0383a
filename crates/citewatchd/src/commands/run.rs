//! Module for the polling daemon

use std::time::Duration;

use super::*;

/// Options for [`Commands::Run`].
#[derive(Args, Clone)]
pub struct RunOptions {
  /// Stop after this many passes instead of running until interrupted
  #[arg(long)]
  pub passes: Option<usize>,
}

/// Function for the [`Commands::Run`] in the CLI.
///
/// Runs a pass, then sleeps for the poll interval. A pass that fails as a whole, e.g. because
/// the mailbox is unavailable, is followed by the retry cooldown instead. Ctrl-C stops the loop
/// between passes.
pub async fn run(config: &Config, options: &RunOptions) -> Result<()> {
  let mut processor = processor(config)?;
  info!(
    maildir = %config.maildir_path.display(),
    database = %config.database_path.display(),
    interval = ?config.poll_interval(),
    "Starting citewatch daemon"
  );

  let shutdown = tokio::signal::ctrl_c();
  tokio::pin!(shutdown);

  let mut completed = 0;
  loop {
    let wait = match run_pass(&mut processor, config) {
      Ok(summary) => {
        print_summary(&summary);
        config.poll_interval()
      },
      Err(e) => {
        error!(error = %e, cooldown = ?config.retry_cooldown(), "Pass failed");
        eprintln!("{} Pass failed: {}", style(ERROR_PREFIX).red(), style(&e).red());
        config.retry_cooldown()
      },
    };

    completed += 1;
    if options.passes.is_some_and(|passes| completed >= passes) {
      info!(completed, "Reached requested number of passes");
      break;
    }

    trace!(?wait, "Sleeping until next pass");
    if !sleep_or_shutdown(wait, shutdown.as_mut()).await {
      break;
    }
  }

  println!("{} Stopped after {} pass(es)", style(SUCCESS_PREFIX).green(), completed);
  Ok(())
}

/// Sleeps for `wait`; returns `false` if Ctrl-C arrived first.
async fn sleep_or_shutdown(
  wait: Duration,
  shutdown: std::pin::Pin<&mut impl std::future::Future<Output = std::io::Result<()>>>,
) -> bool {
  tokio::select! {
    () = tokio::time::sleep(wait) => true,
    signal = shutdown => {
      if let Err(e) = signal {
        error!(error = %e, "Failed to listen for Ctrl-C");
      }
      info!("Received Ctrl-C, shutting down");
      false
    },
  }
}
