//! Module for reporting on the collected data

use super::*;

/// Function for the [`Commands::Status`] in the CLI.
pub fn status(config_path: &Path, config: &Config) -> Result<()> {
  let mut store = RecordStore::open(&config.database_path)?;
  let publications = store.publication_count()?;
  let markers = store.marker_count()?;

  println!("{} citewatch status", style(INFO_PREFIX).cyan());
  println!("   {} Config:       {}", TREE_BRANCH, style(config_path.display()).yellow());
  println!("   {} Database:     {}", TREE_BRANCH, style(config.database_path.display()).yellow());
  println!("   {} Maildir:      {}", TREE_BRANCH, style(config.maildir_path.display()).yellow());
  println!("   {} Publications: {}", TREE_BRANCH, style(publications).green());
  println!("   {} Processed:    {}", TREE_LEAF, style(markers).green());
  Ok(())
}
