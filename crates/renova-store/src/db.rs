//! Database connection management

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::BACKEND;
use renova_core::errors::{ExError, ExErrorKind};
use renova_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Enable foreign keys and WAL journaling
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON")
        .map_err(from_rusqlite)?;

    // journal_mode reports the resulting mode as a row
    let _mode: String = conn
        .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
        .map_err(from_rusqlite)?;

    Ok(())
}

/// Connection shared by every handle of one local store
///
/// Access is serialised through a mutex; the guard is only ever held inside
/// synchronous closures.
#[derive(Clone, Debug)]
pub struct SharedConnection {
    inner: Arc<Mutex<Connection>>,
}

impl SharedConnection {
    pub fn new(conn: Connection) -> Self {
        Self {
            inner: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` with exclusive access to the connection
    pub fn with<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.inner.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("lock")
                .with_message("local database lock poisoned")
        })?;
        f(&mut guard)
    }

    /// Run `f` wrapped in the canonical start/end/error log events
    pub fn logged<T>(
        &self,
        op: &'static str,
        collection: &str,
        f: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        log_op_start!(op, backend = BACKEND, collection = collection);
        let start = Instant::now();

        let result = self.with(f);

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!(
                    op,
                    duration_ms = duration_ms,
                    backend = BACKEND,
                    collection = collection
                );
            }
            Err(err) => {
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = duration_ms,
                    backend = BACKEND,
                    collection = collection
                );
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_in_memory() {
        let conn = open_in_memory().unwrap();
        assert!(configure(&conn).is_ok());
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_shared_connection_runs_closure() {
        let shared = SharedConnection::new(open_in_memory().unwrap());
        let answer = shared
            .with(|conn| {
                conn.query_row("SELECT 41 + 1", [], |row| row.get::<_, i64>(0))
                    .map_err(from_rusqlite)
            })
            .unwrap();
        assert_eq!(answer, 42);
    }

    #[test]
    fn test_logged_emits_end_and_error_events() {
        use renova_core::core_types::schema::{EVENT_END, EVENT_END_ERROR};
        use renova_core::logging_facility::init_test_capture;

        let capture = init_test_capture();
        let shared = SharedConnection::new(open_in_memory().unwrap());

        shared.logged("list", "db_log_ok", |_| Ok(())).unwrap();
        let err = shared
            .logged("list", "db_log_err", |_| -> Result<()> {
                Err(ExError::new(ExErrorKind::Internal).with_message("boom"))
            })
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Internal);
        let ended = capture.count_events(|e| {
            e.event.as_deref() == Some(EVENT_END)
                && e.collection.as_deref() == Some("db_log_ok")
                && e.field("duration_ms").is_some()
        });
        let failed = capture.count_events(|e| {
            e.event.as_deref() == Some(EVENT_END_ERROR)
                && e.collection.as_deref() == Some("db_log_err")
        });
        assert_eq!(ended, 1);
        assert_eq!(failed, 1);
    }
}
