use anyhow::{Context, Result};
use tunebook_core::Database;
use tunebook_etl::{Config, IngestReport, Ingestor};

/// Parse the configured books directory into the database.
pub fn run_load(config: &Config, append: bool) -> Result<()> {
    println!("\n🎵 Loading ABC tune books\n");
    println!("  Books directory: {}", config.books_dir.display());
    println!("  Database: {}", config.database_path.display());
    println!("  Mode: {}", if append { "append" } else { "reset" });
    println!();

    let mut db = Database::open(&config.database_path).context("Failed to open database")?;
    let report = Ingestor::new(&mut db, &config.books_dir)
        .run(!append)
        .context("Loading tunes failed")?;

    print_report(&report);
    Ok(())
}

pub fn print_report(report: &IngestReport) {
    for failure in &report.failures {
        eprintln!(
            "  ✗ {} (book {}): {}",
            failure.path.display(),
            failure.book,
            failure.reason
        );
    }
    println!("\n✓ Done. {report}");
}
