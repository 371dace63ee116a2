use std::cmp::Ordering;

use reqwest::Url;

use crate::types::Episode;

const FEED_SCHEMES: [&str; 3] = ["feed://", "itpc://", "itms://"];

/// Normalizes a user supplied feed URL.
///
/// Podcast-specific schemes (`feed://`, `itpc://`, `itms://`) are rewritten to
/// `http://`, a missing scheme defaults to `http://`, and the result is run
/// through the URL parser which lowercases scheme and host. Returns `None` for
/// anything that is not an http(s) URL with a host.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut candidate = trimmed.to_string();
    for scheme in FEED_SCHEMES {
        let matches = candidate
            .get(..scheme.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(scheme));
        if matches {
            candidate = format!("http://{}", &candidate[scheme.len()..]);
            break;
        }
    }

    if !candidate.contains("://") {
        candidate = format!("http://{}", candidate);
    }

    let url = Url::parse(&candidate).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str()?;

    Some(url.to_string())
}

/// Turns a title into a file system friendly directory name.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut dash = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            dash = false;
        } else if !dash && !slug.is_empty() {
            slug.push('-');
            dash = true;
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "podcast".to_string()
    } else {
        slug
    }
}

/// File name used when downloading an episode.
///
/// Taken from the last path segment of the enclosure URL; falls back to the
/// slugified episode title plus an extension derived from the MIME type.
pub fn episode_filename(episode: &Episode) -> String {
    let from_url = Url::parse(&episode.url).ok().and_then(|url| {
        url.path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
    });

    match from_url {
        Some(name) if name.contains('.') && !name.starts_with('.') => name
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect(),
        _ => format!(
            "{}.{}",
            slugify(&episode.title),
            extension_for(&episode.mime_type)
        ),
    }
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/mp4" | "audio/x-m4a" | "audio/m4a" => "m4a",
        "audio/ogg" | "application/ogg" => "ogg",
        "audio/opus" => "opus",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        _ => "bin",
    }
}

/// Parses an episode identifier as typed by the user.
pub fn parse_episode_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// Returns true if `candidate` is a strictly newer dotted version than `current`.
///
/// A leading `v` is ignored, and each component only counts up to its first
/// non-digit, so `v1.2.0` and `1.2.0-dev` compare equal.
pub fn is_newer_version(candidate: &str, current: &str) -> bool {
    let a = version_parts(candidate);
    let b = version_parts(current);
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Greater => return true,
            Ordering::Less => return false,
            Ordering::Equal => {}
        }
    }
    false
}

fn version_parts(version: &str) -> Vec<u64> {
    version
        .trim()
        .trim_start_matches(['v', 'V'])
        .split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}
