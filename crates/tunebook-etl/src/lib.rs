//! Parsing and ingestion for tunebook.
//!
//! Splits ABC notation files into tune records, discovers numbered book
//! folders, and feeds the parsed tunes into the store.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod ingest;
pub mod parse;

pub use config::Config;
pub use error::{IngestError, IngestResult};
pub use ingest::{discover_books, ensure_populated, Book, FileFailure, IngestReport, Ingestor};
pub use parse::{parse_file, parse_lines, parse_tunes};
