//! SQL DDL for initializing the message storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `users`: admin-style credential rows. Declared for compatibility with
///   existing databases; no route reads or writes it.
/// - `messages`: one row per delivered submission. `created` is an RFC3339
///   UTC timestamp written by the server at insert time.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE,
    password TEXT
);

CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sender TEXT NOT NULL,
    content TEXT NOT NULL,
    created TEXT NOT NULL -- RFC3339
);
"#;
