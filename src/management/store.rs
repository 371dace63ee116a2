use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{LibraryError, Result},
    feed::ParsedFeed,
    types::{Episode, EpisodeState, Podcast},
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Database {
    next_episode_id: u64,
    podcasts: Vec<Podcast>,
}

/// Subscriptions and their episodes, kept in a single JSON document.
pub struct PodcastStore {
    path: Option<PathBuf>,
    db: Database,
}

impl PodcastStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            db: Database {
                next_episode_id: 1,
                podcasts: Vec::new(),
            },
        }
    }

    /// Loads the database at `path`; a missing file yields an empty store.
    pub async fn load(path: PathBuf) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::new(Some(path)));
        }

        let json = async_fs::read_to_string(&path).await?;
        let mut db: Database = serde_json::from_str(&json)?;
        let highest = db
            .podcasts
            .iter()
            .flat_map(|p| p.episodes.iter().map(|e| e.id))
            .max()
            .unwrap_or(0);
        db.next_episode_id = db.next_episode_id.max(highest + 1);

        Ok(Self {
            path: Some(path),
            db,
        })
    }

    pub async fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.db)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    pub fn podcasts(&self) -> &[Podcast] {
        &self.db.podcasts
    }

    pub fn podcast(&self, url: &str) -> Option<&Podcast> {
        self.db.podcasts.iter().find(|p| p.url == url)
    }

    pub fn podcast_mut(&mut self, url: &str) -> Result<&mut Podcast> {
        self.db
            .podcasts
            .iter_mut()
            .find(|p| p.url == url)
            .ok_or_else(|| LibraryError::UnknownPodcast {
                url: url.to_string(),
            })
    }

    pub fn add(&mut self, podcast: Podcast) -> Result<()> {
        if self.podcast(&podcast.url).is_some() {
            return Err(LibraryError::AlreadySubscribed { url: podcast.url });
        }
        self.db.podcasts.push(podcast);
        Ok(())
    }

    pub fn remove(&mut self, url: &str) -> Result<Podcast> {
        let index = self
            .db
            .podcasts
            .iter()
            .position(|p| p.url == url)
            .ok_or_else(|| LibraryError::UnknownPodcast {
                url: url.to_string(),
            })?;
        Ok(self.db.podcasts.remove(index))
    }

    pub fn episode(&self, id: u64) -> Option<(&Podcast, &Episode)> {
        self.db
            .podcasts
            .iter()
            .find_map(|p| p.episodes.iter().find(|e| e.id == id).map(|e| (p, e)))
    }

    pub fn episode_mut(&mut self, id: u64) -> Result<&mut Episode> {
        self.db
            .podcasts
            .iter_mut()
            .flat_map(|p| p.episodes.iter_mut())
            .find(|e| e.id == id)
            .ok_or(LibraryError::UnknownEpisode { id })
    }

    /// Merges a freshly fetched feed into the podcast stored under `url`.
    ///
    /// Known episodes (same guid or same enclosure URL) get their metadata
    /// updated; unknown ones are added with fresh ids. On the first merge of a
    /// subscription only the newest episode is flagged new. Episodes are kept
    /// newest first and capped at `limit` entries, downloaded ones excepted.
    ///
    /// Returns the number of added episodes flagged new.
    pub fn merge_feed(&mut self, url: &str, feed: ParsedFeed, limit: usize) -> Result<usize> {
        let first_id = self.db.next_episode_id.max(1);
        let mut next_id = first_id;

        let podcast = self.podcast_mut(url)?;
        let first_refresh = !podcast.refreshed;

        if !podcast.custom_title && !feed.title.trim().is_empty() {
            podcast.title = feed.title.trim().to_string();
        }
        podcast.link = feed.link.trim().to_string();
        podcast.description = feed.description.trim().to_string();

        for item in feed.items {
            let known = podcast
                .episodes
                .iter_mut()
                .find(|e| e.guid == item.guid || e.url == item.url);

            if let Some(episode) = known {
                episode.title = item.title;
                episode.description = item.description;
                episode.link = item.link;
                episode.published = item.published.or(episode.published);
                if !episode.is_downloaded() {
                    episode.url = item.url;
                    episode.mime_type = item.mime_type;
                    episode.size = item.size;
                }
                continue;
            }

            podcast.episodes.push(Episode {
                id: next_id,
                guid: item.guid,
                title: item.title,
                description: item.description,
                link: item.link,
                url: item.url,
                mime_type: item.mime_type,
                size: item.size,
                published: item.published,
                is_new: !first_refresh,
                state: EpisodeState::Normal,
                download_path: None,
            });
            next_id += 1;
        }

        podcast
            .episodes
            .sort_by(|a, b| b.published.cmp(&a.published));

        if first_refresh {
            if let Some(newest) = podcast.episodes.first_mut() {
                newest.is_new = true;
            }
        }

        let mut kept = 0;
        podcast.episodes.retain(|e| {
            if e.is_downloaded() {
                return true;
            }
            kept += 1;
            kept <= limit
        });
        podcast.refreshed = true;

        let added_new = podcast
            .episodes
            .iter()
            .filter(|e| e.id >= first_id && e.is_new)
            .count();
        self.db.next_episode_id = next_id;

        Ok(added_new)
    }
}
