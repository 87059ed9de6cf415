//! Database schema and migrations.
//!
//! Migrations are applied in order when the database is first opened or
//! upgraded; `schema_version` records which ones have run.

/// Database migrations.
///
/// Each entry is a SQL script executed in its own transaction.
pub const MIGRATIONS: &[&str] = &[
    // v1: Thread documents
    r#"
-- One row per thread. The thread, including its embedded replies, lives in
-- `document` as JSON; the other columns only exist for lookup and ordering.
CREATE TABLE threads (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,  -- creation order
    id          TEXT NOT NULL UNIQUE,
    board       TEXT NOT NULL,
    bumped_on   TEXT NOT NULL,                      -- RFC 3339, fixed width UTC
    version     INTEGER NOT NULL DEFAULT 0,         -- incremented on every write
    document    TEXT NOT NULL
);

CREATE INDEX idx_threads_bumped_on ON threads(bumped_on DESC, seq DESC);
"#,
];
