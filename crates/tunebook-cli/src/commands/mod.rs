pub mod browse;
pub mod config;
pub mod load;

pub use browse::{list_book, list_books, list_keys, list_rhythm, search_titles, show_tune};
pub use load::run_load;
