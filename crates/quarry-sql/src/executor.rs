//! Read-only SQLite executor.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use quarry_core::errors::StorageError;
use quarry_core::traits::QueryExecutor;
use quarry_core::types::{CellValue, QueryOutcome};

/// Runs queries against the structured store. Store faults are folded into
/// [`QueryOutcome::error`].
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Open the database file read-only.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StorageError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "opened structured store");
        Ok(Self { conn })
    }

    /// Wrap an existing connection (for testing).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Column names of `table`, in declaration order.
    pub fn columns(&self, table: &str) -> Result<Vec<String>, StorageError> {
        let sql = format!("PRAGMA table_info('{}')", table.replace('\'', "''"));
        let mut stmt = self.conn.prepare(&sql).map_err(to_storage_err)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .map_err(to_storage_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_storage_err)?;
        Ok(names)
    }

    fn table_names(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type IN ('table', 'view') ORDER BY name")
            .map_err(to_storage_err)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(to_storage_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_storage_err)?;
        Ok(names)
    }

    fn run(&self, query: &str) -> Result<QueryOutcome, rusqlite::Error> {
        let mut stmt = self.conn.prepare(query)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = columns.len();
        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(to_cell(row.get_ref(i)?));
            }
            rows.push(cells);
        }
        Ok(QueryOutcome::success(columns, rows))
    }
}

impl QueryExecutor for SqliteExecutor {
    fn execute(&self, query: &str) -> QueryOutcome {
        if query.trim().is_empty() {
            return QueryOutcome::no_query();
        }
        match self.run(query) {
            Ok(outcome) => {
                tracing::debug!(rows = outcome.rows.len(), "query executed");
                outcome
            }
            Err(e) => {
                tracing::debug!(error = %e, "query failed");
                QueryOutcome::failure(e.to_string())
            }
        }
    }

    fn tables(&self) -> Vec<String> {
        self.table_names().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "schema introspection failed");
            Vec::new()
        })
    }
}

fn to_cell(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(v) => CellValue::Integer(v),
        ValueRef::Real(v) => CellValue::Real(v),
        ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
    }
}

fn to_storage_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}
