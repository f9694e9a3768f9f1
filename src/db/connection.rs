use rusqlite::Connection;
use std::cell::RefCell;

use crate::errors::ServerError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slot, keyed by path so two handles on the same
// thread (as happens in tests) never share a connection.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = const { RefCell::new(None) };
}

#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Open or fetch the per-thread SQLite connection and run `f(conn)`.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        let inner_result = DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let needs_open = match slot.as_ref() {
                    Some((path, _)) => path != &self.path,
                    None => true,
                };
                if needs_open {
                    let conn = open_connection(&self.path)?;
                    *slot = Some((self.path.clone(), conn));
                }
                let (_, conn) = slot.as_mut().expect("connection slot just filled");
                f(conn)
            })
            // TLS access failure is only possible during thread teardown.
            .map_err(|_| ServerError::InternalError)?;
        inner_result
    }
}

fn open_connection(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    // Cascading deletes depend on this; SQLite leaves it off per connection.
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(|e| ServerError::DbError(format!("Enable foreign keys failed: {e}")))?;
    Ok(conn)
}

/// Apply the embedded schema. Safe to run against an existing database.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })
}
