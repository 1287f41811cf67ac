use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::{Result, StoreError};

/// Open an existing meetings store read-write.
///
/// Deliberately omits SQLITE_OPEN_CREATE: the store is provisioned by the
/// scheduling frontend, so a missing file is an operator error, not a reason
/// to silently create an empty database.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| StoreError::Connection {
        path: path.display().to_string(),
        source: e,
    })?;

    // Forces a read of the database header, so a file that is not SQLite
    // fails here instead of on the first real query.
    conn.query_row("SELECT count(*) FROM sqlite_schema", [], |_| Ok(()))
        .map_err(|e| StoreError::Connection {
            path: path.display().to_string(),
            source: e,
        })?;

    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Initialise the meetings schema.
///
/// Safe to call on every startup — uses `IF NOT EXISTS` throughout. The
/// scheduling frontend normally creates these tables; this exists for fresh
/// deployments and tests.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS meetings (
            id              INTEGER PRIMARY KEY,
            name            TEXT    NOT NULL,
            beginn          INTEGER NOT NULL,   -- epoch millis, tz-naive
            ende            INTEGER NOT NULL,   -- epoch millis, tz-naive
            organisator_id  INTEGER NOT NULL,
            resource        TEXT    NOT NULL,
            url             TEXT    NOT NULL,
            password        TEXT    NOT NULL,
            notified        INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE IF NOT EXISTS teilnehmer (
            id              INTEGER PRIMARY KEY,
            uid             TEXT    NOT NULL,
            email           TEXT    NOT NULL,
            permanent       INTEGER NOT NULL DEFAULT 0,
            external        INTEGER NOT NULL DEFAULT 0,
            password        TEXT    NOT NULL,
            active          INTEGER NOT NULL DEFAULT 1
        );
        CREATE TABLE IF NOT EXISTS meeting_teilnehmer (
            meeting_id      INTEGER NOT NULL,
            teilnehmer_id   INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_mt_meeting
            ON meeting_teilnehmer (meeting_id);
        CREATE INDEX IF NOT EXISTS idx_mt_teilnehmer
            ON meeting_teilnehmer (teilnehmer_id);",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_is_connection_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = open(&dir.path().join("no-such.db"));
        assert!(matches!(result, Err(StoreError::Connection { .. })));
    }

    #[test]
    fn open_non_sqlite_file_is_connection_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("garbage.db");
        std::fs::write(&path, b"this is not a database").expect("write");
        let result = open(&path);
        assert!(matches!(result, Err(StoreError::Connection { .. })));
    }

    #[test]
    fn open_valid_store_succeeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("meetings.db");
        let conn = Connection::open(&path).expect("create");
        init_db(&conn).expect("init");
        drop(conn);
        assert!(open(&path).is_ok());
    }

    #[test]
    fn init_db_is_idempotent() {
        let conn = Connection::open_in_memory().expect("open");
        init_db(&conn).expect("first");
        init_db(&conn).expect("second");
    }
}
