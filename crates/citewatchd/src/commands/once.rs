//! Module for a single pass over the mailbox

use super::*;

/// Function for the [`Commands::Once`] in the CLI.
pub fn once(config: &Config) -> Result<()> {
  println!(
    "{} Checking {} for alerts",
    style(INFO_PREFIX).cyan(),
    style(config.maildir_path.display()).yellow()
  );
  let mut processor = processor(config)?;
  let summary = run_pass(&mut processor, config)?;
  print_summary(&summary);
  Ok(())
}

/// Prints the tally of a pass and every message left unread.
pub fn print_summary(summary: &PassSummary) {
  if summary.total() == 0 {
    println!("{} No unread alerts", style(INFO_PREFIX).cyan());
    return;
  }

  println!(
    "{} {} new, {} already known",
    style(SUCCESS_PREFIX).green(),
    style(summary.inserted).green(),
    style(summary.duplicates).yellow()
  );

  if summary.failures.is_empty() {
    return;
  }
  println!(
    "{} {} message(s) left unread:",
    style(WARNING_PREFIX).yellow(),
    style(summary.failures.len()).red()
  );
  for (i, (handle, failure)) in summary.failures.iter().enumerate() {
    let branch = if i + 1 == summary.failures.len() { TREE_LEAF } else { TREE_BRANCH };
    println!("   {} {}: {}", style(branch).dim(), style(handle).yellow(), failure);
  }
}
