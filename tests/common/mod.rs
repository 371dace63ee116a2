#![allow(dead_code)]

use std::path::{Path, PathBuf};

use podcli::{
    errors::{LibraryError, Result},
    management::{Library, SettingValue, SettingsManager},
    types::{Episode, EpisodeState, Outline, Podcast},
};

/// In-memory library that records what the handlers asked it to do.
#[derive(Default)]
pub struct FakeLibrary {
    pub podcasts: Vec<Podcast>,
    pub settings: SettingsManager,
    pub outlines: Vec<Outline>,
    /// Episode ids whose download fails.
    pub failing_downloads: Vec<u64>,
    pub downloads: Vec<u64>,
    pub refreshed: Vec<String>,
    pub shutdown_calls: usize,
}

impl FakeLibrary {
    pub fn with_podcasts(podcasts: Vec<Podcast>) -> Self {
        Self {
            podcasts,
            ..Default::default()
        }
    }

    fn podcast_mut(&mut self, url: &str) -> Result<&mut Podcast> {
        self.podcasts
            .iter_mut()
            .find(|p| p.url == url)
            .ok_or_else(|| LibraryError::UnknownPodcast {
                url: url.to_string(),
            })
    }

    fn episode_mut(&mut self, id: u64) -> Result<&mut Episode> {
        self.podcasts
            .iter_mut()
            .flat_map(|p| p.episodes.iter_mut())
            .find(|e| e.id == id)
            .ok_or(LibraryError::UnknownEpisode { id })
    }
}

impl Library for FakeLibrary {
    fn podcasts(&self) -> &[Podcast] {
        &self.podcasts
    }

    fn podcast(&self, url: &str) -> Option<&Podcast> {
        self.podcasts.iter().find(|p| p.url == url)
    }

    fn episode(&self, id: u64) -> Option<(&Podcast, &Episode)> {
        self.podcasts
            .iter()
            .find_map(|p| p.episodes.iter().find(|e| e.id == id).map(|e| (p, e)))
    }

    fn settings(&self) -> &SettingsManager {
        &self.settings
    }

    async fn subscribe(&mut self, url: &str, title: Option<&str>) -> Result<()> {
        if self.podcast(url).is_some() {
            return Err(LibraryError::AlreadySubscribed {
                url: url.to_string(),
            });
        }
        let mut podcast = Podcast::new(url.to_string());
        if let Some(title) = title {
            podcast.title = title.to_string();
        }
        self.podcasts.push(podcast);
        Ok(())
    }

    async fn unsubscribe(&mut self, url: &str) -> Result<()> {
        self.podcast_mut(url)?;
        self.podcasts.retain(|p| p.url != url);
        Ok(())
    }

    async fn rename(&mut self, url: &str, title: &str) -> Result<()> {
        self.podcast_mut(url)?.title = title.to_string();
        Ok(())
    }

    async fn rewrite(&mut self, old_url: &str, new_url: &str) -> Result<()> {
        self.podcast_mut(old_url)?.url = new_url.to_string();
        Ok(())
    }

    async fn set_enabled(&mut self, url: &str, enabled: bool) -> Result<()> {
        self.podcast_mut(url)?.enabled = enabled;
        Ok(())
    }

    async fn refresh(&mut self, url: &str) -> Result<usize> {
        self.podcast_mut(url)?;
        self.refreshed.push(url.to_string());
        Ok(0)
    }

    async fn mark(&mut self, id: u64, is_new: bool) -> Result<()> {
        self.episode_mut(id)?.is_new = is_new;
        Ok(())
    }

    async fn download(
        &mut self,
        id: u64,
        progress: &mut dyn FnMut(Option<f64>),
    ) -> Result<PathBuf> {
        if self.failing_downloads.contains(&id) {
            return Err(LibraryError::NoEnclosure { id });
        }

        progress(Some(0.5));
        let episode = self.episode_mut(id)?;
        episode.state = EpisodeState::Downloaded;
        episode.is_new = false;
        self.downloads.push(id);
        progress(Some(1.0));
        Ok(PathBuf::from(format!("/tmp/episode-{}.mp3", id)))
    }

    async fn delete(&mut self, id: u64) -> Result<()> {
        let episode = self.episode_mut(id)?;
        episode.state = EpisodeState::Deleted;
        episode.is_new = false;
        Ok(())
    }

    async fn outlines(&self, _source: &str) -> Result<Vec<Outline>> {
        Ok(self.outlines.clone())
    }

    async fn export(&self, _path: &Path) -> Result<usize> {
        Ok(self.podcasts.len())
    }

    async fn set_setting(&mut self, key: &str, value: &str) -> Result<SettingValue> {
        self.settings.set(key, value)
    }

    async fn newer_version(&self) -> Result<Option<String>> {
        Ok(None)
    }

    async fn shutdown(&mut self) -> Result<()> {
        self.shutdown_calls += 1;
        Ok(())
    }
}

pub fn episode(id: u64, title: &str, is_new: bool) -> Episode {
    Episode {
        id,
        guid: format!("guid-{}", id),
        title: title.to_string(),
        description: String::new(),
        link: String::new(),
        url: format!("http://media.example.com/{}.mp3", id),
        mime_type: "audio/mpeg".to_string(),
        size: 1024 * id,
        published: None,
        is_new,
        state: EpisodeState::Normal,
        download_path: None,
    }
}

pub fn podcast(url: &str, title: &str, episodes: Vec<Episode>) -> Podcast {
    let mut podcast = Podcast::new(url.to_string());
    podcast.title = title.to_string();
    podcast.refreshed = true;
    podcast.episodes = episodes;
    podcast
}

/// Two podcasts with five episodes, two of them new.
pub fn sample_library() -> FakeLibrary {
    FakeLibrary::with_podcasts(vec![
        podcast(
            "http://talk.example.com/feed",
            "Talk Show",
            vec![
                episode(1, "Rust in production", true),
                episode(2, "Async all the things", false),
                episode(3, "Talking about talks", false),
            ],
        ),
        podcast(
            "http://news.example.com/rss",
            "Daily News",
            vec![
                episode(4, "Monday news", true),
                episode(5, "Tuesday news", false),
            ],
        ),
    ])
}

pub fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
