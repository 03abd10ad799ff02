//! Core domain model for tunebook.
//!
//! This crate defines the `Tune` record extracted from ABC notation files,
//! its identifier type, and the SQLite store that persists tunes.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
pub use model::{HeaderField, NewTune, Tune, TuneId};
pub use schema::Database;
