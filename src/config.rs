//! Configuration management for the podcast aggregator.
//!
//! This module handles loading environment variables from a `.env` file and
//! resolving the locations the application reads from and writes to. Runtime
//! settings that users change from inside the program (colors, paging, the
//! download directory) live in the settings store of the
//! [`management`](crate::management) module instead.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

/// Application directory name below the platform data directory.
pub const APP_DIR: &str = "podcli";

/// Release endpoint queried by the `version` command when `PODCLI_UPDATE_URL`
/// is not set.
pub const DEFAULT_UPDATE_URL: &str = "https://api.github.com/repos/podcli/podcli/releases/latest";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the application directory if it doesn't exist and loads the
/// `podcli/.env` file below the platform-specific local data directory:
/// - Linux: `~/.local/share/podcli/.env`
/// - macOS: `~/Library/Application Support/podcli/.env`
/// - Windows: `%LOCALAPPDATA%/podcli/.env`
///
/// A missing `.env` file is not an error; every setting has a default.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    async_fs::create_dir_all(&path)
        .await
        .map_err(|e| e.to_string())?;

    path.push(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the directory holding the podcast database, the settings file and
/// (by default) the downloaded episodes.
///
/// `PODCLI_HOME` overrides the platform data directory.
pub fn data_dir() -> PathBuf {
    match env::var("PODCLI_HOME") {
        Ok(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(APP_DIR);
            path
        }
    }
}

/// Returns the release endpoint used to look for newer versions.
pub fn update_url() -> String {
    env::var("PODCLI_UPDATE_URL").unwrap_or_else(|_| DEFAULT_UPDATE_URL.to_string())
}

/// Returns the pager command line, split into program and arguments.
///
/// Reads `PAGER`, falling back to `less -R` so colored output survives paging.
pub fn pager() -> Vec<String> {
    let raw = env::var("PAGER").unwrap_or_default();
    match shell_words::split(&raw) {
        Ok(words) if !words.is_empty() => words,
        _ => vec!["less".to_string(), "-R".to_string()],
    }
}
