//! Discover numbered book folders and load their ABC files into the store.
//!
//! The books directory holds one subdirectory per book, named by its number
//! (`abc_books/0`, `abc_books/1`, ...). Every `.abc` file directly inside a
//! book folder is parsed and its tunes inserted, one file per batch.

use std::fmt;
use std::path::{Path, PathBuf};

use tunebook_core::Database;
use walkdir::WalkDir;

use crate::error::{IngestError, IngestResult};
use crate::parse::parse_file;

/// A numbered book folder and the ABC files it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub path: PathBuf,
    /// `.abc` files in the folder, sorted by file name.
    pub files: Vec<PathBuf>,
    /// Entries of the folder that could not be listed.
    pub failures: Vec<FileFailure>,
}

/// A file whose tunes could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub book: i64,
    pub reason: String,
}

/// Totals for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub books: usize,
    pub files: usize,
    pub tunes: usize,
    pub failures: Vec<FileFailure>,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total tunes inserted into DB: {} ({} file(s) across {} book(s))",
            self.tunes, self.files, self.books
        )?;
        if !self.failures.is_empty() {
            write!(f, ", {} file(s) failed", self.failures.len())?;
        }
        Ok(())
    }
}

/// List the book folders under `books_dir`, sorted by book number.
///
/// Only immediate subdirectories whose name is all ASCII digits count as
/// books; anything else is skipped.
pub fn discover_books(books_dir: &Path) -> IngestResult<Vec<Book>> {
    if !books_dir.is_dir() {
        return Err(IngestError::MissingBooksDir {
            path: books_dir.to_path_buf(),
        });
    }

    let mut books = Vec::new();
    for entry in WalkDir::new(books_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| IngestError::Scan {
            path: books_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let Some(id) = book_number(&name) else {
            log::debug!("Skipping non-book folder {}", path.display());
            continue;
        };

        let (files, failures) = abc_files(path, id);
        books.push(Book {
            id,
            path: path.to_path_buf(),
            files,
            failures,
        });
    }

    books.sort_by_key(|book| book.id);
    Ok(books)
}

fn book_number(name: &str) -> Option<i64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match name.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("Ignoring book folder '{}': {}", name, e);
            None
        }
    }
}

fn is_abc_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".abc"))
}

/// `.abc` entries of a book folder, plus any entries that could not be listed.
///
/// Entries are kept by name alone; one that cannot be opened fails later as
/// a read error for that file.
fn abc_files(book_dir: &Path, book: i64) -> (Vec<PathBuf>, Vec<FileFailure>) {
    let mut files = Vec::new();
    let mut failures = Vec::new();
    for entry in WalkDir::new(book_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_dir() && is_abc_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => failures.push(FileFailure {
                path: e.path().unwrap_or(book_dir).to_path_buf(),
                book,
                reason: e.to_string(),
            }),
        }
    }
    (files, failures)
}

/// Loads every book under a directory into a store.
#[derive(Debug)]
pub struct Ingestor<'db> {
    db: &'db mut Database,
    books_dir: PathBuf,
}

impl<'db> Ingestor<'db> {
    #[must_use]
    pub fn new(db: &'db mut Database, books_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            books_dir: books_dir.into(),
        }
    }

    /// Parse and store every book, optionally resetting the store first.
    ///
    /// A missing books directory is reported before the store is touched.
    /// A file that cannot be read is recorded in the report and skipped.
    /// A failed write aborts the run; batches already written stay.
    pub fn run(&mut self, reset: bool) -> IngestResult<IngestReport> {
        log::info!("Loading tunes from {}", self.books_dir.display());
        let books = discover_books(&self.books_dir)?;

        self.db.initialize(reset)?;

        let mut report = IngestReport::default();
        for book in &books {
            log::info!(
                "Found book {} with {} abc file(s)",
                book.id,
                book.files.len()
            );
            report.books += 1;

            for failure in &book.failures {
                log::warn!(
                    "Skipping entry {}: {}",
                    failure.path.display(),
                    failure.reason
                );
            }
            report.failures.extend(book.failures.iter().cloned());

            for path in &book.files {
                match self.ingest_file(path, book.id) {
                    Ok(count) => {
                        log::info!(
                            "Parsed & inserted {} tune(s) from {}",
                            count,
                            path.display()
                        );
                        report.files += 1;
                        report.tunes += count;
                    }
                    Err(e) if e.is_persistence() => return Err(e),
                    Err(e) => {
                        log::warn!("Skipping file: {}", e);
                        report.failures.push(FileFailure {
                            path: path.clone(),
                            book: book.id,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        log::info!("{}", report);
        Ok(report)
    }

    fn ingest_file(&mut self, path: &Path, book: i64) -> IngestResult<usize> {
        let tunes = parse_file(path, book)?;
        let ids = self
            .db
            .insert_many(&tunes)
            .map_err(|source| IngestError::Store {
                path: path.to_path_buf(),
                book,
                source,
            })?;
        Ok(ids.len())
    }
}

/// Load the books into an empty store; leave a populated one alone.
///
/// Returns the report of the load, or `None` when the store already held
/// tunes.
pub fn ensure_populated(
    db: &mut Database,
    books_dir: impl Into<PathBuf>,
) -> IngestResult<Option<IngestReport>> {
    if db.count_tunes()? > 0 {
        return Ok(None);
    }

    log::info!("Tunes table is empty, parsing ABC files and loading database");
    Ingestor::new(db, books_dir).run(false).map(Some)
}
