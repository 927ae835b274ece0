use std::time::{Duration, Instant};

use duckdb::Connection;
use tracing::debug;
use txd_common::{Result, TxdError};

use crate::Table;

/// The single long-lived handle to the embedded engine.
///
/// Lifecycle is explicit and caller-managed: acquire once with
/// [`Engine::open`], reuse across submissions, release by dropping. The
/// handle is reused as a resource-acquisition optimization only; every
/// submission blocks until the engine returns, and no state other than the
/// connection itself survives between calls.
pub struct Engine {
    conn: Connection,
}

impl Engine {
    /// Acquire an in-memory connection. Data lives in external files and is
    /// reached through the query text, so nothing is attached here.
    pub fn open() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| TxdError::Execution(format!("failed to open engine: {e}")))?;
        Ok(Self { conn })
    }

    /// Execute `sql` verbatim and collect the full result.
    ///
    /// The caller is trusted to supply well-formed text; whatever text is
    /// given is executed unchanged. Any engine failure is captured here and
    /// returned as an [`TxdError::Execution`] message, never a panic.
    pub fn submit(&self, sql: &str) -> Result<Table> {
        debug!(sql, "submitting query");
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| TxdError::Execution(e.to_string()))?;
        let batches = stmt
            .query_arrow([])
            .map_err(|e| TxdError::Execution(e.to_string()))?
            .collect::<Vec<_>>();
        Ok(Table::from_batches(&batches))
    }

    /// [`Engine::submit`] plus wall-clock elapsed over the whole submission.
    pub fn submit_timed(&self, sql: &str) -> Result<(Table, Duration)> {
        let start = Instant::now();
        let table = self.submit(sql)?;
        Ok((table, start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellValue;

    #[test]
    fn submit_returns_named_columns_and_rows() {
        let engine = Engine::open().expect("open engine");
        let table = engine
            .submit("SELECT 1 AS one, 'a' AS tag, 2.5 AS score")
            .expect("submit");
        assert_eq!(table.columns(), ["one", "tag", "score"]);
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.i64_at(0, "one"), Some(1));
        assert_eq!(table.text_at(0, "tag"), Some("a"));
        assert_eq!(table.f64_at(0, "score"), Some(2.5));
    }

    #[test]
    fn submit_surfaces_engine_errors_as_messages() {
        let engine = Engine::open().expect("open engine");
        let err = engine.submit("SELEC definitely not sql").unwrap_err();
        match err {
            TxdError::Execution(msg) => assert!(!msg.is_empty()),
            other => panic!("expected execution error, got {other:?}"),
        }
    }

    #[test]
    fn null_cells_come_back_as_null() {
        let engine = Engine::open().expect("open engine");
        let table = engine.submit("SELECT NULL AS nothing").expect("submit");
        assert_eq!(table.cell(0, "nothing"), Some(&CellValue::Null));
        assert_eq!(table.f64_at(0, "nothing"), None);
    }

    #[test]
    fn submit_timed_reports_elapsed_only_on_success() {
        let engine = Engine::open().expect("open engine");
        let (table, elapsed) = engine.submit_timed("SELECT 42 AS v").expect("submit");
        assert_eq!(table.i64_at(0, "v"), Some(42));
        assert!(elapsed.as_secs_f64() >= 0.0);
        assert!(engine.submit_timed("not a query").is_err());
    }
}
