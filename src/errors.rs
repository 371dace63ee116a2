//! Error types for the podcast library.
//!
//! The dispatcher never lets these escape: every handler reports the message as a
//! one-line diagnostic and returns a failure indication.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read or write database: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Cannot parse XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Not subscribed to {url}")]
    UnknownPodcast { url: String },

    #[error("Already subscribed to {url}")]
    AlreadySubscribed { url: String },

    #[error("Invalid episode ID: {id}")]
    UnknownEpisode { id: u64 },

    #[error("Episode {id} has no download URL")]
    NoEnclosure { id: u64 },

    #[error("Not a podcast feed: {reason}")]
    InvalidFeed { reason: String },

    #[error("Invalid config key: {key}")]
    UnknownSetting { key: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidSetting { key: String, value: String },

    #[error("Query syntax error: {reason}")]
    Query { reason: String },

    #[error("Download target exists and is not a file: {path}")]
    BadTarget { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, LibraryError>;
