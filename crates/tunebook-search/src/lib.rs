//! Read-only queries over the tune store.
//!
//! A [`TuneTable`] is a snapshot of every stored tune, loaded once and then
//! filtered and aggregated in memory.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod table;

pub use table::{BookCount, KeyCount, TuneTable};
