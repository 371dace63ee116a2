use reqwest::Client;

use crate::{errors::Result, types::ReleaseResponse, utils};

/// Asks the release endpoint for the latest published version.
///
/// Returns `Some(tag)` when that version is newer than `current`.
pub async fn newer_release(client: &Client, endpoint: &str, current: &str) -> Result<Option<String>> {
    let release = client
        .get(endpoint)
        .header("Accept", "application/json")
        .send()
        .await?
        .error_for_status()?
        .json::<ReleaseResponse>()
        .await?;

    tracing::debug!("latest release: {}, running: {}", release.tag_name, current);
    if utils::is_newer_version(&release.tag_name, current) {
        Ok(Some(release.tag_name))
    } else {
        Ok(None)
    }
}
