use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeState {
    #[default]
    Normal,
    Downloaded,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub guid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    /// Enclosure (media file) URL.
    pub url: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub state: EpisodeState,
    #[serde(default)]
    pub download_path: Option<PathBuf>,
}

impl Episode {
    pub fn is_downloaded(&self) -> bool {
        self.state == EpisodeState::Downloaded
    }

    /// Short status label shown in episode listings.
    pub fn status(&self) -> &'static str {
        match (self.state, self.is_new) {
            (EpisodeState::Downloaded, _) => "downloaded",
            (EpisodeState::Deleted, _) => "deleted",
            (EpisodeState::Normal, true) => "new",
            (EpisodeState::Normal, false) => "",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Podcast {
    /// Normalized feed URL, unique across the database.
    pub url: String,
    pub title: String,
    /// Set once the user renamed the podcast; refreshes keep the title then.
    #[serde(default)]
    pub custom_title: bool,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// False until the first successful refresh.
    #[serde(default)]
    pub refreshed: bool,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

fn default_enabled() -> bool {
    true
}

impl Podcast {
    pub fn new(url: String) -> Self {
        Self {
            title: url.clone(),
            url,
            custom_title: false,
            link: String::new(),
            description: String::new(),
            enabled: true,
            refreshed: false,
            episodes: Vec::new(),
        }
    }

    pub fn count_new(&self) -> usize {
        self.episodes
            .iter()
            .filter(|e| e.is_new && e.state == EpisodeState::Normal)
            .count()
    }

    pub fn count_downloaded(&self) -> usize {
        self.episodes.iter().filter(|e| e.is_downloaded()).count()
    }
}

/// One entry of an OPML subscription list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub url: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseResponse {
    pub tag_name: String,
}

#[derive(Tabled)]
pub struct PodcastTableRow {
    pub title: String,
    pub url: String,
    pub new: usize,
    pub status: String,
}

#[derive(Tabled)]
pub struct EpisodeTableRow {
    pub id: u64,
    pub status: String,
    pub date: String,
    pub size: String,
    pub title: String,
}
