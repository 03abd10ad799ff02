use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for tunebook.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (TUNEBOOK_* prefix)
/// 3. Config file (~/.config/tunebook/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: TUNEBOOK_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/tunebook/tunes.db
    pub database_path: PathBuf,

    /// Directory holding the numbered book folders.
    ///
    /// Can be set via:
    /// - CLI: --books-dir /path/to/abc_books
    /// - ENV: TUNEBOOK_BOOKS_DIR
    /// - Config: books_dir = "/path/to/abc_books"
    /// - Default: abc_books (relative to the working directory)
    pub books_dir: PathBuf,

    pub logging: LoggingConfig,
}

/// Logger settings handed to the binary's logger at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
    pub coloured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            coloured: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            books_dir: default_books_dir(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/tunebook/config.toml
    /// Reads environment variables with TUNEBOOK_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("tunebook");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Apply CLI overrides on top of a loaded configuration.
    #[must_use]
    pub fn with_overrides(mut self, db_path: Option<PathBuf>, books_dir: Option<PathBuf>) -> Self {
        if let Some(db_path) = db_path {
            self.database_path = db_path;
        }
        if let Some(books_dir) = books_dir {
            self.books_dir = books_dir;
        }
        self
    }
}

/// Get the default database path.
///
/// Returns: ~/.local/share/tunebook/tunes.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tunebook")
        .join("tunes.db")
}

fn default_books_dir() -> PathBuf {
    PathBuf::from("abc_books")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/tunebook/config.toml
/// - macOS: ~/Library/Application Support/tunebook/config.toml
/// - Windows: %APPDATA%\tunebook\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tunebook")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Tunebook Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (TUNEBOOK_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite database holding the parsed tunes
#
# Can also be set via:
# - CLI: tunebook --db /custom/path.db books
# - Environment: TUNEBOOK_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/tunes.db"

# Directory containing numbered book folders (0, 1, 2, ...) of .abc files
#
# Can also be set via:
# - CLI: tunebook --books-dir /path/to/abc_books load
# - Environment: TUNEBOOK_BOOKS_DIR=/path/to/abc_books
books_dir = "abc_books"

[logging]
# trace, debug, info, warn or error
level = "info"
coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
