use reqwest::Client;

use crate::{
    errors::Result,
    feed::{self, ParsedFeed},
    opml,
    remote::fetch_text,
    types::Outline,
};

/// Downloads and parses the RSS feed at `url`.
pub async fn fetch_feed(client: &Client, url: &str) -> Result<ParsedFeed> {
    let body = fetch_text(client, url).await?;
    let parsed = feed::parse_feed(&body)?;
    tracing::debug!("{}: {} episodes in feed", url, parsed.items.len());
    Ok(parsed)
}

/// Downloads and parses an OPML subscription list published at `url`.
pub async fn fetch_outlines(client: &Client, url: &str) -> Result<Vec<Outline>> {
    let body = fetch_text(client, url).await?;
    opml::parse_outlines(&body)
}
