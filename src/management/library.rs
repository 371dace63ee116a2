use std::path::{Path, PathBuf};

use reqwest::{Client, Url};

use crate::{
    config,
    errors::{LibraryError, Result},
    management::{
        PodcastStore, SettingsManager,
        settings::{KEY_DOWNLOAD_DIR, KEY_EPISODE_LIMIT, SettingValue},
    },
    opml, remote,
    types::{Episode, EpisodeState, Outline, Podcast},
    utils,
};

pub const DATABASE_FILE: &str = "podcasts.json";
pub const SETTINGS_FILE: &str = "settings.json";

/// Operations the command handlers need from a podcast library.
///
/// URLs passed in are expected to be normalized already (see
/// [`utils::normalize_url`]). Every mutating operation is persisted by the
/// implementation before it returns; [`Library::shutdown`] flushes whatever
/// is left and is called exactly once per process run.
#[allow(async_fn_in_trait)]
pub trait Library {
    fn podcasts(&self) -> &[Podcast];
    fn podcast(&self, url: &str) -> Option<&Podcast>;
    fn episode(&self, id: u64) -> Option<(&Podcast, &Episode)>;
    fn settings(&self) -> &SettingsManager;

    /// Adds a subscription and fetches its feed once.
    ///
    /// # Arguments
    ///
    /// * `url` - Normalized feed URL
    /// * `title` - Custom title kept across refreshes, if given
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::AlreadySubscribed`] for a known URL, or the
    /// network or parse error of the first fetch. A failed fetch leaves no
    /// subscription behind.
    async fn subscribe(&mut self, url: &str, title: Option<&str>) -> Result<()>;
    async fn unsubscribe(&mut self, url: &str) -> Result<()>;
    async fn rename(&mut self, url: &str, title: &str) -> Result<()>;
    async fn rewrite(&mut self, old_url: &str, new_url: &str) -> Result<()>;
    async fn set_enabled(&mut self, url: &str, enabled: bool) -> Result<()>;

    /// Fetches the feed and merges it; returns the number of new episodes.
    async fn refresh(&mut self, url: &str) -> Result<usize>;

    async fn mark(&mut self, id: u64, is_new: bool) -> Result<()>;

    /// Downloads an episode's enclosure into the podcast's folder.
    ///
    /// # Arguments
    ///
    /// * `id` - Episode ID
    /// * `progress` - Called with the completed fraction, or `None` while the
    ///   total size is unknown
    ///
    /// # Returns
    ///
    /// The path of the stored file, which is also recorded on the episode.
    async fn download(&mut self, id: u64, progress: &mut dyn FnMut(Option<f64>)) -> Result<PathBuf>;

    /// Removes the downloaded file and marks the episode deleted.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::UnknownEpisode`] for an unknown ID, or the I/O
    /// error of the removal. The episode is left untouched in both cases.
    async fn delete(&mut self, id: u64) -> Result<()>;

    /// Reads the subscription list of an OPML file or http(s) URL.
    async fn outlines(&self, source: &str) -> Result<Vec<Outline>>;
    async fn export(&self, path: &Path) -> Result<usize>;

    async fn set_setting(&mut self, key: &str, value: &str) -> Result<SettingValue>;
    async fn newer_version(&self) -> Result<Option<String>>;
    async fn shutdown(&mut self) -> Result<()>;
}

/// The on-disk podcast library used by the `podcli` binary.
pub struct PodcastLibrary {
    data_dir: PathBuf,
    store: PodcastStore,
    settings: SettingsManager,
    client: Client,
}

impl PodcastLibrary {
    /// Opens the library in the configured data directory.
    pub async fn open() -> Result<Self> {
        Self::open_in(config::data_dir()).await
    }

    pub async fn open_in(data_dir: PathBuf) -> Result<Self> {
        let store = PodcastStore::load(data_dir.join(DATABASE_FILE)).await?;
        let settings = SettingsManager::load(data_dir.join(SETTINGS_FILE)).await?;
        tracing::debug!(
            "opened library in {} ({} podcasts)",
            data_dir.display(),
            store.podcasts().len()
        );

        Ok(Self {
            data_dir,
            store,
            settings,
            client: remote::client()?,
        })
    }

    fn downloads_dir(&self) -> PathBuf {
        match self.settings.text(KEY_DOWNLOAD_DIR) {
            "" => self.data_dir.join("downloads"),
            dir => PathBuf::from(dir),
        }
    }

    fn episode_limit(&self) -> usize {
        usize::try_from(self.settings.int(KEY_EPISODE_LIMIT))
            .ok()
            .filter(|limit| *limit > 0)
            .unwrap_or(usize::MAX)
    }
}

impl Library for PodcastLibrary {
    fn podcasts(&self) -> &[Podcast] {
        self.store.podcasts()
    }

    fn podcast(&self, url: &str) -> Option<&Podcast> {
        self.store.podcast(url)
    }

    fn episode(&self, id: u64) -> Option<(&Podcast, &Episode)> {
        self.store.episode(id)
    }

    fn settings(&self) -> &SettingsManager {
        &self.settings
    }

    async fn subscribe(&mut self, url: &str, title: Option<&str>) -> Result<()> {
        let url = utils::normalize_url(url).ok_or_else(|| LibraryError::InvalidUrl {
            url: url.to_string(),
        })?;

        let mut podcast = Podcast::new(url.clone());
        if let Some(title) = title {
            podcast.title = title.to_string();
            podcast.custom_title = true;
        }
        self.store.add(podcast)?;

        let limit = self.episode_limit();
        let merged = match remote::feeds::fetch_feed(&self.client, &url).await {
            Ok(feed) => self.store.merge_feed(&url, feed, limit),
            Err(e) => Err(e),
        };
        if let Err(e) = merged {
            self.store.remove(&url)?;
            return Err(e);
        }

        self.store.persist().await
    }

    async fn unsubscribe(&mut self, url: &str) -> Result<()> {
        self.store.remove(url)?;
        self.store.persist().await
    }

    async fn rename(&mut self, url: &str, title: &str) -> Result<()> {
        let podcast = self.store.podcast_mut(url)?;
        podcast.title = title.to_string();
        podcast.custom_title = true;
        self.store.persist().await
    }

    async fn rewrite(&mut self, old_url: &str, new_url: &str) -> Result<()> {
        let new_url = utils::normalize_url(new_url).ok_or_else(|| LibraryError::InvalidUrl {
            url: new_url.to_string(),
        })?;
        if self.store.podcast(&new_url).is_some() {
            return Err(LibraryError::AlreadySubscribed { url: new_url });
        }

        self.store.podcast_mut(old_url)?.url = new_url;
        self.store.persist().await
    }

    async fn set_enabled(&mut self, url: &str, enabled: bool) -> Result<()> {
        self.store.podcast_mut(url)?.enabled = enabled;
        self.store.persist().await
    }

    async fn refresh(&mut self, url: &str) -> Result<usize> {
        if self.store.podcast(url).is_none() {
            return Err(LibraryError::UnknownPodcast {
                url: url.to_string(),
            });
        }

        let feed = remote::feeds::fetch_feed(&self.client, url).await?;
        let limit = self.episode_limit();
        let new_episodes = self.store.merge_feed(url, feed, limit)?;
        self.store.persist().await?;
        Ok(new_episodes)
    }

    async fn mark(&mut self, id: u64, is_new: bool) -> Result<()> {
        self.store.episode_mut(id)?.is_new = is_new;
        self.store.persist().await
    }

    async fn download(&mut self, id: u64, progress: &mut dyn FnMut(Option<f64>)) -> Result<PathBuf> {
        let (podcast, episode) = self
            .store
            .episode(id)
            .ok_or(LibraryError::UnknownEpisode { id })?;
        if episode.url.is_empty() {
            return Err(LibraryError::NoEnclosure { id });
        }

        let target = self
            .downloads_dir()
            .join(utils::slugify(&podcast.title))
            .join(utils::episode_filename(episode));
        let url = episode.url.clone();

        let written = remote::download::download_to(&self.client, &url, &target, progress).await?;

        let episode = self.store.episode_mut(id)?;
        episode.state = EpisodeState::Downloaded;
        episode.is_new = false;
        episode.size = written;
        episode.download_path = Some(target.clone());
        self.store.persist().await?;

        Ok(target)
    }

    async fn delete(&mut self, id: u64) -> Result<()> {
        let episode = self.store.episode_mut(id)?;
        if let Some(path) = episode.download_path.clone() {
            if path.is_file() {
                async_fs::remove_file(&path).await?;
            }
        }

        // the episode only changes once its file is gone
        let episode = self.store.episode_mut(id)?;
        episode.download_path = None;
        episode.state = EpisodeState::Deleted;
        episode.is_new = false;
        self.store.persist().await
    }

    async fn outlines(&self, source: &str) -> Result<Vec<Outline>> {
        let is_remote = Url::parse(source)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);

        if is_remote {
            remote::feeds::fetch_outlines(&self.client, source).await
        } else {
            let xml = async_fs::read_to_string(source).await?;
            opml::parse_outlines(&xml)
        }
    }

    async fn export(&self, path: &Path) -> Result<usize> {
        let podcasts = self.store.podcasts();
        async_fs::write(path, opml::write_outlines(podcasts)).await?;
        Ok(podcasts.len())
    }

    async fn set_setting(&mut self, key: &str, value: &str) -> Result<SettingValue> {
        let value = self.settings.set(key, value)?;
        self.settings.persist().await?;
        Ok(value)
    }

    async fn newer_version(&self) -> Result<Option<String>> {
        remote::version::newer_release(
            &self.client,
            &config::update_url(),
            env!("CARGO_PKG_VERSION"),
        )
        .await
    }

    async fn shutdown(&mut self) -> Result<()> {
        tracing::debug!("shutting down library");
        self.store.persist().await?;
        self.settings.persist().await
    }
}
