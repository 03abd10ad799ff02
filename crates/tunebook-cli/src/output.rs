//! Text and JSON rendering of query results.

use anyhow::{Context, Result};
use serde::Serialize;
use tunebook_core::Tune;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
    println!("{text}");
    Ok(())
}

/// One-line summary: `[id] title | rhythm | key`.
pub fn tune_line(tune: &Tune) -> String {
    format!(
        "[{}] {} | {} | {}",
        tune.id,
        tune.title.as_deref().unwrap_or("(no title)"),
        tune.rhythm.as_deref().unwrap_or("-"),
        tune.key.as_deref().unwrap_or("-"),
    )
}

pub fn print_tunes(tunes: &[&Tune], json: bool) -> Result<()> {
    if json {
        return print_json(tunes);
    }
    if tunes.is_empty() {
        println!("No tunes found.");
        return Ok(());
    }
    for tune in tunes {
        println!("{}", tune_line(tune));
    }
    Ok(())
}

pub fn print_tune(tune: &Tune) {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| String::from("-"));

    println!("\n--- Tune ID: {} ---", tune.id);
    println!("Title: {}", field(&tune.title));
    println!("Book: {}", tune.book);
    println!("File: {} (X:{})", tune.source_name, tune.reference);
    println!("Rhythm: {}", field(&tune.rhythm));
    println!("Meter: {}", field(&tune.meter));
    println!("Key: {}", field(&tune.key));
    println!("\nABC notation:\n");
    println!("{}", tune.body);
    println!("\n---------------------------\n");
}
