use anyhow::{Context, Result};
use tunebook_core::{Database, TuneId};
use tunebook_etl::{ensure_populated, Config};
use tunebook_search::TuneTable;

use super::load::print_report;
use crate::output;

/// Open the store, load the books if it is empty, and snapshot every tune.
fn open_table(config: &Config) -> Result<TuneTable> {
    let mut db = Database::open(&config.database_path).context("Failed to open database")?;

    match ensure_populated(&mut db, &config.books_dir) {
        Ok(Some(report)) => print_report(&report),
        Ok(None) => {}
        Err(e) if e.is_input_absence() => {
            log::warn!("{e}; continuing with an empty tune list");
        }
        Err(e) => return Err(e).context("Failed to populate database"),
    }

    TuneTable::load(&db).context("Failed to load tunes")
}

/// Print tune counts per book.
pub fn list_books(config: &Config, json: bool) -> Result<()> {
    let table = open_table(config)?;
    let counts = table.counts_per_book();

    if json {
        return output::print_json(&counts);
    }
    if counts.is_empty() {
        println!("No tunes in database.");
        return Ok(());
    }

    println!("\nTunes per book:");
    for entry in counts {
        println!("  Book {}: {} tune(s)", entry.book, entry.count);
    }
    Ok(())
}

/// Print the tunes of one book.
pub fn list_book(config: &Config, number: i64, json: bool) -> Result<()> {
    let table = open_table(config)?;
    output::print_tunes(&table.by_book(number), json)
}

/// Print the tunes whose rhythm contains `term`.
pub fn list_rhythm(config: &Config, term: &str, json: bool) -> Result<()> {
    let table = open_table(config)?;
    output::print_tunes(&table.by_rhythm(term), json)
}

/// Print the tunes whose title contains `term`.
pub fn search_titles(config: &Config, term: &str, json: bool) -> Result<()> {
    let table = open_table(config)?;
    output::print_tunes(&table.search_title(term), json)
}

/// Print one tune with its full notation.
pub fn show_tune(config: &Config, id: i64, json: bool) -> Result<()> {
    let table = open_table(config)?;
    let Some(tune) = table.find(TuneId::new(id)) else {
        println!("No tune found with id {id}");
        return Ok(());
    };

    if json {
        return output::print_json(tune);
    }
    output::print_tune(tune);
    Ok(())
}

/// Print the most common keys.
pub fn list_keys(config: &Config, top: usize, json: bool) -> Result<()> {
    let table = open_table(config)?;
    let keys = table.top_keys(top);

    if json {
        return output::print_json(&keys);
    }
    if keys.is_empty() {
        println!("No key information available.");
        return Ok(());
    }

    println!("\nMost common keys:");
    for entry in keys {
        println!("  {}: {} tune(s)", entry.key, entry.count);
    }
    Ok(())
}
