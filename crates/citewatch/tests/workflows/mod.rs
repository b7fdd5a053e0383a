use super::*;

mod alert_extraction;
mod maildir_processing;
