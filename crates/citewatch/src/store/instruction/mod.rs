//! Operations executed against a [`RecordStore`].
//!
//! Each operation is a small value implementing [`StoreInstruction`], so it can be built,
//! inspected and executed separately.

use super::*;

pub mod count;
pub mod insert;

use rusqlite::params;

pub use self::{count::Count, insert::*};

/// A single operation against the store.
pub trait StoreInstruction {
  /// What a successful execution yields.
  type Output;

  // &mut so instructions can open transactions without taking the store.
  /// Runs the instruction.
  fn execute(&self, store: &mut RecordStore) -> Result<Self::Output>;
}
