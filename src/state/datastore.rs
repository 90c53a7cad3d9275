use crate::exec::run_with_timeout;
use crate::probes::types::DbState;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Read-only row counting against the appliance datastore.
pub trait RecordCounter {
    /// Count the rows of one record group; `None` when the query fails.
    fn count_records(&self, db_path: &Path, table: &str) -> Option<u64>;
}

/// Default counter: one scoped `sqlite3` CLI invocation per table, no held
/// connection. Counts across tables are not a single atomic snapshot.
pub struct SqliteCli {
    timeout: Duration,
}

impl SqliteCli {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl RecordCounter for SqliteCli {
    fn count_records(&self, db_path: &Path, table: &str) -> Option<u64> {
        let query = format!("SELECT COUNT(*) FROM {table}");
        let db = db_path.to_string_lossy();

        let output = match run_with_timeout("sqlite3", &[db.as_ref(), &query], self.timeout) {
            Ok(out) if out.status.success() => out,
            Ok(out) => {
                warn!(
                    table = %table,
                    stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                    "row count query failed"
                );
                return None;
            }
            Err(err) => {
                warn!(table = %table, error = %err, "row count query failed");
                return None;
            }
        };

        parse_count(&String::from_utf8_lossy(&output.stdout))
    }
}

/// An empty result means zero rows; anything non-numeric is a failure.
fn parse_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<u64>().ok()
}

/// Inspect the datastore: existence, byte size, and per-table record counts.
/// A failed count degrades to 0 for that table without blocking the others;
/// an absent store skips all further I/O.
pub fn inspect_datastore(
    counter: &dyn RecordCounter,
    db_path: &Path,
    tables: &[String],
) -> DbState {
    let size = match fs::metadata(db_path) {
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) | Err(_) => {
            return DbState {
                available: false,
                size: 0,
                records: BTreeMap::new(),
            };
        }
    };

    let mut records = BTreeMap::new();
    for table in tables {
        let count = counter.count_records(db_path, table).unwrap_or(0);
        records.insert(table.clone(), count);
    }

    DbState {
        available: true,
        size,
        records,
    }
}
