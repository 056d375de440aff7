use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 1;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    // The compatibility table's composite primary key carries the
    // at-most-one-record-per-unordered-pair invariant: subjects are
    // stored in canonical order and concurrent first writes collapse to
    // a single winner via INSERT OR IGNORE.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS charts (
            person_id TEXT NOT NULL,
            position  TEXT NOT NULL,
            stem      TEXT NOT NULL,
            branch    TEXT NOT NULL,
            PRIMARY KEY (person_id, position)
        );

        CREATE TABLE IF NOT EXISTS strengths (
            person_id      TEXT PRIMARY KEY,
            classification TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS day_pillars (
            date   TEXT PRIMARY KEY,
            stem   TEXT NOT NULL,
            branch TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS compatibility (
            id               TEXT NOT NULL,
            subject_a        TEXT NOT NULL,
            subject_b        TEXT NOT NULL,
            element_a        TEXT NOT NULL,
            element_b        TEXT NOT NULL,
            score            INTEGER NOT NULL,
            category         TEXT NOT NULL,
            branch_relation  TEXT NOT NULL,
            yin_yang         REAL NOT NULL,
            strength         REAL NOT NULL,
            day_branch       REAL NOT NULL,
            useful_god       REAL NOT NULL,
            stem_combination REAL NOT NULL,
            PRIMARY KEY (subject_a, subject_b)
        );
        ",
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    tracing::debug!("schema initialized at version {SCHEMA_VERSION}");
    Ok(())
}

pub fn get_schema_version(conn: &Connection) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = 'schema_version'")?;
    let version = stmt
        .query_row([], |row| {
            let v: String = row.get(0)?;
            Ok(v.parse::<i64>().unwrap_or(0))
        })
        .ok();
    Ok(version)
}
