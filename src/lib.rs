//! Podcast Aggregator CLI Library
//!
//! This library provides the building blocks of the `podcli` command-line podcast
//! aggregator: a statically declared command table with abbreviation resolution,
//! a dispatcher that validates argument counts before invoking handlers, an
//! interactive shell with line editing and tab completion, and the podcast
//! library the commands operate on (subscriptions, feed refresh, downloads,
//! OPML import/export and episode queries).
//!
//! # Modules
//!
//! - `cli` - Command table, prefix resolver, dispatcher and command handlers
//! - `config` - Environment loading and data directory resolution
//! - `errors` - Error types raised by the podcast library
//! - `feed` - RSS document parsing
//! - `management` - The podcast library, its database and settings
//! - `opml` - OPML subscription list parsing and writing
//! - `output` - Colorization, size formatting, progress lines and paging
//! - `query` - Episode query expressions
//! - `remote` - HTTP access: feed fetching, downloads, version check
//! - `shell` - Interactive read-eval-print loop
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use podcli::{cli::Session, management::PodcastLibrary};
//!
//! #[tokio::main]
//! async fn main() -> podcli::Res<()> {
//!     let library = PodcastLibrary::open().await?;
//!     let mut session = Session::new(library);
//!     session.run_single(&["list".to_string()]).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod feed;
pub mod management;
pub mod opml;
pub mod output;
pub mod query;
pub mod remote;
pub mod shell;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the process-level plumbing (startup, environment loading) where
/// any error is simply reported and turned into an exit status. The library
/// layer uses the more specific [`errors::LibraryError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Used for progress and status lines on standard output, such as the
/// episode count after a `query` or the per-podcast refresh summary.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// # use podcli::info;
/// let count = 3;
/// info!("Updating {} podcasts", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Arguments
///
/// Same as `println!`.
///
/// # Example
///
/// ```
/// # use podcli::success;
/// let url = "http://talk.example.com/feed";
/// success!("Subscribed to {}", url);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark to standard error.
///
/// Every user input error and every failed library call ends up here as a
/// single line. The current command returns a failure indication afterwards;
/// the shell itself keeps running.
///
/// # Arguments
///
/// The macro accepts the same arguments as `eprintln!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// # use podcli::error;
/// let raw = "x1";
/// error!("Invalid episode ID: {}", raw);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Warnings go to standard output and do not fail the command. Anything
/// the user has to correct belongs in [`error!`] instead.
///
/// # Example
///
/// ```
/// # use podcli::warning;
/// let url = "http://talk.example.com/feed";
/// warning!("Podcast {} is disabled", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
