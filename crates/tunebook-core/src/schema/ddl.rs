//! SQL text for the `tunes` relation.

/// Create the `tunes` table if it does not exist yet.
pub const CREATE_TUNES: &str = r#"
CREATE TABLE IF NOT EXISTS tunes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    book INTEGER,
    filename TEXT,
    tune_ref TEXT,
    title TEXT,
    rhythm TEXT,
    meter TEXT,
    key TEXT,
    abc TEXT
);

CREATE INDEX IF NOT EXISTS idx_tunes_book ON tunes(book);
"#;

/// Drop the `tunes` table. SQLite removes its `sqlite_sequence` row along
/// with it, so id assignment restarts at 1.
pub const DROP_TUNES: &str = r#"
DROP INDEX IF EXISTS idx_tunes_book;
DROP TABLE IF EXISTS tunes;
"#;

pub const INSERT_TUNE: &str = "INSERT INTO tunes (book, filename, tune_ref, title, rhythm, meter, key, abc)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

pub const SELECT_TUNES: &str = "SELECT id, book, filename, tune_ref, title, rhythm, meter, key, abc
     FROM tunes
     ORDER BY id";
