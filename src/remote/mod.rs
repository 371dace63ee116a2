//! # Remote Access Module
//!
//! Everything that talks to the network lives here: fetching and parsing
//! podcast feeds, streaming episode downloads to disk, reading OPML lists
//! published on the web, and asking the release endpoint whether a newer
//! version of the program exists.
//!
//! ## Request Handling
//!
//! All requests go through one shared [`reqwest::Client`] built by [`client`],
//! which identifies itself with a `podcli/<version>` user agent. Text fetches
//! retry transient gateway failures (502/503) a few times before giving up;
//! other HTTP errors are propagated to the caller unchanged.
//!
//! ## Error Types
//!
//! Functions return [`crate::errors::Result`]; network failures surface as
//! [`LibraryError::Http`](crate::errors::LibraryError::Http), file system
//! failures during downloads as
//! [`LibraryError::Io`](crate::errors::LibraryError::Io).

pub mod download;
pub mod feeds;
pub mod version;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::errors::Result;

const MAX_RETRIES: u32 = 3;

pub fn client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(20))
        .build()?;
    Ok(client)
}

/// Fetches a document as text, retrying on gateway errors.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let mut attempt = 0;

    loop {
        attempt += 1;
        tracing::debug!("GET {} (attempt {})", url, attempt);

        let response = client.get(url).send().await?;
        match response.error_for_status() {
            Ok(valid_response) => return Ok(valid_response.text().await?),
            Err(err) => {
                let retry = matches!(
                    err.status(),
                    Some(StatusCode::BAD_GATEWAY) | Some(StatusCode::SERVICE_UNAVAILABLE)
                );
                if retry && attempt < MAX_RETRIES {
                    sleep(Duration::from_secs(2 * attempt as u64)).await;
                    continue; // retry
                }
                return Err(err.into());
            }
        }
    }
}
