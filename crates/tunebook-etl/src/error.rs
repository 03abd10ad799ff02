//! Error types for parsing and ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading books into the store.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The configured books directory does not exist.
    #[error("books directory '{}' not found", .path.display())]
    MissingBooksDir { path: PathBuf },

    /// The books directory could not be listed.
    #[error("failed to scan {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A source file could not be read.
    #[error("failed to read {} (book {book}): {source}", .path.display())]
    Read {
        path: PathBuf,
        book: i64,
        source: std::io::Error,
    },

    /// Tunes parsed from a file could not be written to the store.
    #[error("failed to store tunes from {} (book {book}): {source}", .path.display())]
    Store {
        path: PathBuf,
        book: i64,
        source: tunebook_core::Error,
    },

    /// An error propagated from the store outside of a file batch.
    #[error("database error: {0}")]
    Database(#[from] tunebook_core::Error),
}

impl IngestError {
    /// Returns `true` when nothing could be ingested because the input
    /// directory is missing.
    pub fn is_input_absence(&self) -> bool {
        matches!(self, Self::MissingBooksDir { .. })
    }

    /// Returns `true` when the store rejected a write.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Store { .. } | Self::Database(_))
    }
}

/// Convenience alias for ingestion results.
pub type IngestResult<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let missing = IngestError::MissingBooksDir {
            path: PathBuf::from("abc_books"),
        };
        assert!(missing.is_input_absence());
        assert!(!missing.is_persistence());

        let read = IngestError::Read {
            path: PathBuf::from("abc_books/1/reels.abc"),
            book: 1,
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!read.is_input_absence());
        assert!(!read.is_persistence());
    }

    #[test]
    fn test_read_error_names_file_and_book() {
        let read = IngestError::Read {
            path: PathBuf::from("abc_books/2/jigs.abc"),
            book: 2,
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let message = read.to_string();
        assert!(message.contains("jigs.abc"));
        assert!(message.contains("book 2"));
    }
}
