use tabled::Table;

use crate::{
    cli::Session,
    error, info,
    management::{Library, settings::KEY_PAGING},
    output::{self, Action},
    success,
    types::PodcastTableRow,
    utils,
};

impl<L: Library> Session<L> {
    pub(crate) async fn subscribe(&mut self, url: &str, title: Option<&str>) -> bool {
        let Some(url) = utils::normalize_url(url) else {
            error!("Invalid URL: {}", url);
            return false;
        };

        if self.library.podcast(&url).is_some() {
            error!("You are already subscribed to {}", url);
            return false;
        }

        let action = Action::start(format!("Subscribing {}", url));
        match self.library.subscribe(&url, title).await {
            Ok(()) => action.finish(true),
            Err(e) => {
                action.finish(false);
                error!("Cannot subscribe to {}: {}", url, e);
                false
            }
        }
    }

    pub(crate) async fn unsubscribe(&mut self, url: &str) -> bool {
        let Some(url) = self.require_podcast(url) else {
            return false;
        };

        match self.library.unsubscribe(&url).await {
            Ok(()) => {
                success!("Unsubscribed from {}", url);
                true
            }
            Err(e) => {
                error!("Cannot unsubscribe from {}: {}", url, e);
                false
            }
        }
    }

    pub(crate) async fn rename(&mut self, url: &str, title: &str) -> bool {
        let Some(url) = self.require_podcast(url) else {
            return false;
        };

        let old_title = self
            .library
            .podcast(&url)
            .map(|p| p.title.clone())
            .unwrap_or_default();

        match self.library.rename(&url, title).await {
            Ok(()) => {
                success!("Renamed {} to {}", old_title, title);
                true
            }
            Err(e) => {
                error!("Cannot rename {}: {}", url, e);
                false
            }
        }
    }

    pub(crate) async fn rewrite(&mut self, url: &str, new_url: &str) -> bool {
        let Some(url) = self.require_podcast(url) else {
            return false;
        };
        let Some(new_url) = utils::normalize_url(new_url) else {
            error!("Invalid URL: {}", new_url);
            return false;
        };

        match self.library.rewrite(&url, &new_url).await {
            Ok(()) => {
                success!("Changed feed URL of {} to {}", url, new_url);
                true
            }
            Err(e) => {
                error!("Cannot change feed URL of {}: {}", url, e);
                false
            }
        }
    }

    pub(crate) async fn set_enabled(&mut self, url: &str, enabled: bool) -> bool {
        let Some(url) = self.require_podcast(url) else {
            return false;
        };

        let already = self
            .library
            .podcast(&url)
            .is_some_and(|p| p.enabled == enabled);
        if already {
            info!(
                "Podcast {} is already {}",
                url,
                if enabled { "enabled" } else { "disabled" }
            );
            return true;
        }

        match self.library.set_enabled(&url, enabled).await {
            Ok(()) => {
                success!(
                    "{} {}",
                    if enabled { "Enabled" } else { "Disabled" },
                    url
                );
                true
            }
            Err(e) => {
                error!("Cannot change {}: {}", url, e);
                false
            }
        }
    }

    pub(crate) fn info(&self, url: &str) -> bool {
        let Some(url) = self.require_podcast(url) else {
            return false;
        };
        let Some(podcast) = self.library.podcast(&url) else {
            return false;
        };

        info!("Title: {}", podcast.title);
        info!("URL: {}", podcast.url);
        if !podcast.link.is_empty() {
            info!("Website: {}", podcast.link);
        }
        info!(
            "Status: {}",
            if podcast.enabled { "enabled" } else { "disabled" }
        );
        info!(
            "Episodes: {} ({} new, {} downloaded)",
            podcast.episodes.len(),
            podcast.count_new(),
            podcast.count_downloaded()
        );
        if !podcast.description.is_empty() {
            println!("\n{}", podcast.description);
        }
        true
    }

    pub(crate) fn list(&self) -> bool {
        let podcasts = self.library.podcasts();
        if podcasts.is_empty() {
            info!("No podcasts subscribed. Use subscribe URL to add one.");
            return true;
        }

        let mut sorted: Vec<_> = podcasts.iter().collect();
        sorted.sort_by_key(|p| p.title.to_lowercase());

        let rows: Vec<PodcastTableRow> = sorted
            .into_iter()
            .map(|p| PodcastTableRow {
                title: p.title.clone(),
                url: p.url.clone(),
                new: p.count_new(),
                status: if p.enabled {
                    String::new()
                } else {
                    "disabled".to_string()
                },
            })
            .collect();

        let table = Table::new(rows);
        output::page(
            &format!("{}\n", table),
            self.library.settings().flag(KEY_PAGING),
        );
        true
    }
}
