use std::fmt::Write;

use tabled::Table;

use crate::{
    cli::Session,
    error, info,
    management::{Library, settings::KEY_PAGING},
    output::{self, Action},
    success,
    types::{Episode, EpisodeTableRow, Podcast},
    warning,
};

impl<L: Library> Session<L> {
    /// Podcasts a command with an optional URL argument works on: the named
    /// one, or all enabled podcasts.
    fn target_urls(&self, url: Option<&str>) -> Option<Vec<String>> {
        match url {
            Some(url) => self.require_podcast(url).map(|url| vec![url]),
            None => Some(
                self.library
                    .podcasts()
                    .iter()
                    .filter(|p| p.enabled)
                    .map(|p| p.url.clone())
                    .collect(),
            ),
        }
    }

    pub(crate) async fn update(&mut self, url: Option<&str>) -> bool {
        let Some(urls) = self.target_urls(url) else {
            return false;
        };
        if urls.is_empty() {
            info!("No podcasts to update.");
            return true;
        }

        let mut all_ok = true;
        let mut new_episodes = 0;
        for url in urls {
            let title = self
                .library
                .podcast(&url)
                .map(|p| p.title.clone())
                .unwrap_or_else(|| url.clone());

            let action = Action::start(format!("Updating {}", title));
            match self.library.refresh(&url).await {
                Ok(count) => {
                    new_episodes += count;
                    action.finish(true);
                }
                Err(e) => {
                    action.finish(false);
                    error!("Cannot update {}: {}", url, e);
                    all_ok = false;
                }
            }
        }

        if new_episodes > 0 {
            success!("{} new episodes", new_episodes);
        } else {
            info!("No new episodes");
        }
        all_ok
    }

    pub(crate) fn pending(&self, url: Option<&str>) -> bool {
        let Some(urls) = self.target_urls(url) else {
            return false;
        };

        let mut text = String::new();
        let mut count = 0;
        for url in &urls {
            let Some(podcast) = self.library.podcast(url) else {
                continue;
            };
            for episode in podcast.episodes.iter().filter(|e| e.status() == "new") {
                let _ = writeln!(text, "{}", episode_line(podcast, episode));
                count += 1;
            }
        }

        if count == 0 {
            info!("No new episodes");
            return true;
        }

        output::page(&text, self.library.settings().flag(KEY_PAGING));
        info!("{} new episodes", count);
        true
    }

    pub(crate) fn episodes(&self, url: Option<&str>) -> bool {
        let urls: Vec<String> = match url {
            Some(url) => match self.require_podcast(url) {
                Some(url) => vec![url],
                None => return false,
            },
            None => self
                .library
                .podcasts()
                .iter()
                .map(|p| p.url.clone())
                .collect(),
        };

        let mut text = String::new();
        for url in &urls {
            let Some(podcast) = self.library.podcast(url) else {
                continue;
            };

            let rows: Vec<EpisodeTableRow> = podcast
                .episodes
                .iter()
                .map(|e| EpisodeTableRow {
                    id: e.id,
                    status: e.status().to_string(),
                    date: e
                        .published
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    size: output::format_filesize(e.size),
                    title: e.title.clone(),
                })
                .collect();

            let _ = writeln!(text, "{} ({})", podcast.title, podcast.url);
            if rows.is_empty() {
                let _ = writeln!(text, "  no episodes\n");
            } else {
                let _ = writeln!(text, "{}\n", Table::new(rows));
            }
        }

        if text.is_empty() {
            info!("No podcasts subscribed.");
            return true;
        }

        output::page(&text, self.library.settings().flag(KEY_PAGING));
        true
    }

    pub(crate) async fn download(&mut self, url: Option<&str>) -> bool {
        let Some(urls) = self.target_urls(url) else {
            return false;
        };

        let ids: Vec<u64> = urls
            .iter()
            .filter_map(|url| self.library.podcast(url))
            .flat_map(|p| p.episodes.iter().filter(|e| e.status() == "new"))
            .map(|e| e.id)
            .collect();

        if ids.is_empty() {
            info!("No new episodes to download");
            return true;
        }

        let mut all_ok = true;
        for id in ids {
            all_ok &= self.download_episode(id).await;
        }
        all_ok
    }

    pub(crate) async fn fetch(&mut self, raw_ids: &[String]) -> bool {
        let mut ids = Vec::with_capacity(raw_ids.len());
        for raw in raw_ids {
            match self.require_episode(raw) {
                Some(id) => ids.push(id),
                None => return false,
            }
        }

        let mut all_ok = true;
        for id in ids {
            all_ok &= self.download_episode(id).await;
        }
        all_ok
    }

    async fn download_episode(&mut self, id: u64) -> bool {
        let title = match self.library.episode(id) {
            Some((_, episode)) if episode.is_downloaded() => {
                info!("Episode {} is already downloaded", id);
                return true;
            }
            Some((_, episode)) => episode.title.clone(),
            None => {
                error!("Invalid episode ID: {}", id);
                return false;
            }
        };

        let action = Action::start(format!("Downloading {}", title));
        let result = self
            .library
            .download(id, &mut |progress| action.update(progress))
            .await;

        match result {
            Ok(path) => {
                tracing::debug!("episode {} saved to {}", id, path.display());
                action.finish(true)
            }
            Err(e) => {
                action.finish(false);
                error!("Cannot download {}: {}", title, e);
                false
            }
        }
    }

    pub(crate) fn details(&self, raw_id: &str) -> bool {
        let Some(id) = self.require_episode(raw_id) else {
            return false;
        };
        let Some((podcast, episode)) = self.library.episode(id) else {
            return false;
        };

        info!("Title: {}", episode.title);
        info!("Podcast: {}", podcast.title);
        info!("ID: {}", episode.id);
        if let Some(published) = episode.published {
            info!("Released: {}", published.format("%Y-%m-%d %H:%M"));
        }
        info!("Size: {}", output::format_filesize(episode.size));
        info!("URL: {}", episode.url);
        if !episode.link.is_empty() {
            info!("Link: {}", episode.link);
        }
        let status = match episode.status() {
            "" => "old",
            status => status,
        };
        info!("Status: {}", status);
        if let Some(path) = &episode.download_path {
            info!("File: {}", path.display());
        }
        if !episode.description.is_empty() {
            println!("\n{}", episode.description.trim());
        }
        true
    }

    pub(crate) async fn mark(&mut self, state: &str, raw_id: &str) -> bool {
        let is_new = match state {
            "new" => true,
            "old" => false,
            _ => {
                error!("Invalid action keyword: {} (expected new or old)", state);
                return false;
            }
        };
        let Some(id) = self.require_episode(raw_id) else {
            return false;
        };

        match self.library.mark(id, is_new).await {
            Ok(()) => {
                success!("Marked episode {} as {}", id, state);
                true
            }
            Err(e) => {
                error!("Cannot mark episode {}: {}", id, e);
                false
            }
        }
    }

    pub(crate) async fn rm(&mut self, raw_id: &str) -> bool {
        let Some(id) = self.require_episode(raw_id) else {
            return false;
        };

        if self.library.episode(id).is_some_and(|(_, e)| !e.is_downloaded()) {
            warning!("Episode {} is not downloaded", id);
        }

        match self.library.delete(id).await {
            Ok(()) => {
                success!("Deleted episode {}", id);
                true
            }
            Err(e) => {
                error!("Cannot delete episode {}: {}", id, e);
                false
            }
        }
    }
}

/// One-line listing of an episode used by `pending` and `query`.
pub(crate) fn episode_line(podcast: &Podcast, episode: &Episode) -> String {
    let status = match episode.status() {
        "" => String::new(),
        status => format!(" [{}]", status),
    };
    format!(
        "{:>6}  {} - {}{}",
        episode.id, podcast.title, episode.title, status
    )
}

