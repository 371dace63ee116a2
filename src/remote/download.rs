use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::{fs, io::AsyncWriteExt};

use crate::errors::{LibraryError, Result};

/// Streams `url` into `target`, reporting progress after every chunk.
///
/// Data is written to `<target>.partial` first and renamed once the transfer
/// completed, so an interrupted download never leaves a truncated file under
/// the final name. The callback receives the completed fraction in `[0, 1]`
/// when the server announced a content length, `None` otherwise.
///
/// Returns the number of bytes written.
pub async fn download_to(
    client: &Client,
    url: &str,
    target: &Path,
    progress: &mut dyn FnMut(Option<f64>),
) -> Result<u64> {
    if target.is_dir() {
        return Err(LibraryError::BadTarget {
            path: target.to_path_buf(),
        });
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut response = client.get(url).send().await?.error_for_status()?;
    let total = response.content_length().filter(|len| *len > 0);
    tracing::debug!("downloading {} ({:?} bytes) to {}", url, total, target.display());

    let partial = partial_path(target);
    let mut file = fs::File::create(&partial).await?;
    let mut written: u64 = 0;
    progress(total.map(|_| 0.0));

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        progress(total.map(|len| (written as f64 / len as f64).min(1.0)));
    }

    file.flush().await?;
    drop(file);
    fs::rename(&partial, target).await?;
    progress(Some(1.0));

    Ok(written)
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}
