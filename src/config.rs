/// Runtime configuration resolved from the command line and environment
///
/// The binary parses its flags with clap and turns them into an AppConfig;
/// everything below the binary only ever sees the resolved values.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

/// Settings the application runs with
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite database file holding the saved state
    pub database_path: PathBuf,
    /// Pinned reference day; None means "today" in the local timezone
    pub reference_day: Option<NaiveDate>,
}

impl AppConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            reference_day: None,
        }
    }

    /// Pin the day treated as "today"
    pub fn with_reference_day(mut self, day: Option<NaiveDate>) -> Self {
        self.reference_day = day;
        self
    }

    /// The day treated as "today"
    pub fn today(&self) -> NaiveDate {
        self.reference_day
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Get the default database path with robust fallback strategy
///
/// Candidate directories are tried in order of preference; the first one
/// that can be created and written to wins.
pub fn default_database_path() -> std::io::Result<PathBuf> {
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|p| p.join(".dayone")),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|p| p.join("dayone")),
        // 3. User's config directory
        dirs::config_dir().map(|p| p.join("dayone")),
        // 4. Current working directory (last resort)
        std::env::current_dir().ok().map(|p| p.join(".dayone")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if is_writable_dir(potential_path) {
            return Ok(potential_path.join("dayone.db"));
        }
    }

    // Ultimate fallback: use a temporary directory
    let temp_path = std::env::temp_dir().join("dayone");
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path.join("dayone.db"))
}

/// Make sure the parent directory of an explicit database path exists
pub fn prepare_database_path(path: PathBuf) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(path)
}

fn is_writable_dir(dir: &std::path::Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let test_file = dir.join(".test_write");
    if std::fs::write(&test_file, "test").is_ok() {
        let _ = std::fs::remove_file(&test_file);
        return true;
    }
    false
}
