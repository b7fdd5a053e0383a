use super::*;

/// Counts rows of one of the store's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
  /// Stored publications
  Publications,
  /// Processed-message markers
  Markers,
}

impl StoreInstruction for Count {
  type Output = u64;

  fn execute(&self, store: &mut RecordStore) -> Result<Self::Output> {
    let sql = match self {
      Count::Publications => "SELECT COUNT(*) FROM publications",
      Count::Markers => "SELECT COUNT(*) FROM processed_messages",
    };
    Ok(store.conn.query_row(sql, [], |row| row.get(0))?)
  }
}
