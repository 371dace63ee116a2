use podcli::{
    types::{Episode, EpisodeState},
    utils::*,
};

// Helper function to create a test episode
fn create_test_episode(title: &str, url: &str, mime_type: &str) -> Episode {
    Episode {
        id: 1,
        guid: "guid".to_string(),
        title: title.to_string(),
        description: String::new(),
        link: String::new(),
        url: url.to_string(),
        mime_type: mime_type.to_string(),
        size: 0,
        published: None,
        is_new: false,
        state: EpisodeState::Normal,
        download_path: None,
    }
}

#[test]
fn test_normalize_url_rewrites_podcast_schemes() {
    assert_eq!(
        normalize_url("feed://example.com/rss").as_deref(),
        Some("http://example.com/rss")
    );
    assert_eq!(
        normalize_url("itpc://example.com/rss").as_deref(),
        Some("http://example.com/rss")
    );
    assert_eq!(
        normalize_url("ITMS://example.com/rss").as_deref(),
        Some("http://example.com/rss")
    );
}

#[test]
fn test_normalize_url_adds_missing_scheme() {
    assert_eq!(
        normalize_url("example.com/podcast.xml").as_deref(),
        Some("http://example.com/podcast.xml")
    );
    assert_eq!(
        normalize_url("  https://Example.COM/Feed  ").as_deref(),
        Some("https://example.com/Feed")
    );
    // bare hosts get a root path
    assert_eq!(
        normalize_url("http://example.com").as_deref(),
        Some("http://example.com/")
    );
}

#[test]
fn test_normalize_url_rejects_non_http() {
    assert_eq!(normalize_url(""), None);
    assert_eq!(normalize_url("   "), None);
    assert_eq!(normalize_url("ftp://example.com/feed"), None);
    assert_eq!(normalize_url("file:///etc/passwd"), None);
}

#[test]
fn test_normalize_url_is_idempotent() {
    let once = normalize_url("feed://Example.com/a b").unwrap();
    assert_eq!(normalize_url(&once).as_deref(), Some(once.as_str()));
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("Hello, World!"), "hello-world");
    assert_eq!(slugify("  Rust -- Weekly  "), "rust-weekly");
    assert_eq!(slugify("Ärger über Öl"), "ärger-über-öl");
    assert_eq!(slugify("!!!"), "podcast");
    assert_eq!(slugify(""), "podcast");
}

#[test]
fn test_episode_filename_from_url() {
    let episode = create_test_episode(
        "Whatever",
        "https://media.example.com/shows/ep1.mp3?token=abc",
        "audio/mpeg",
    );
    assert_eq!(episode_filename(&episode), "ep1.mp3");
}

#[test]
fn test_episode_filename_from_title() {
    let episode = create_test_episode(
        "My Episode #3",
        "https://media.example.com/download",
        "audio/x-m4a",
    );
    assert_eq!(episode_filename(&episode), "my-episode-3.m4a");

    let episode = create_test_episode("Unknown", "https://media.example.com/", "text/plain");
    assert_eq!(episode_filename(&episode), "unknown.bin");
}

#[test]
fn test_parse_episode_id() {
    assert_eq!(parse_episode_id("42"), Some(42));
    assert_eq!(parse_episode_id(" 7 "), Some(7));
    assert_eq!(parse_episode_id("-1"), None);
    assert_eq!(parse_episode_id("abc"), None);
    assert_eq!(parse_episode_id(""), None);
}

#[test]
fn test_is_newer_version() {
    assert!(is_newer_version("v1.2.0", "1.1.9"));
    assert!(is_newer_version("0.3.1", "0.3.0-dev"));
    assert!(is_newer_version("1.10", "1.9.5"));

    assert!(!is_newer_version("1.2.0", "1.2.0-dev"));
    assert!(!is_newer_version("v0.2.9", "0.3.0"));
    assert!(!is_newer_version("1.0", "1.0.0"));
}
