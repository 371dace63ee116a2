use std::path::Path;

use crate::{cli::Session, error, info, management::Library, success, utils};

impl<L: Library> Session<L> {
    pub(crate) async fn import(&mut self, source: &str) -> bool {
        let outlines = match self.library.outlines(source).await {
            Ok(outlines) => outlines,
            Err(e) => {
                error!("Cannot import {}: {}", source, e);
                return false;
            }
        };

        if outlines.is_empty() {
            info!("No feeds found in {}", source);
            return true;
        }

        let mut all_ok = true;
        let mut subscribed = 0;
        for outline in outlines {
            let known = utils::normalize_url(&outline.url)
                .is_some_and(|url| self.library.podcast(&url).is_some());
            if known {
                info!("Skipping {} (already subscribed)", outline.url);
                continue;
            }

            if self.subscribe(&outline.url, outline.title.as_deref()).await {
                subscribed += 1;
            } else {
                all_ok = false;
            }
        }

        success!("Subscribed to {} podcasts from {}", subscribed, source);
        all_ok
    }

    pub(crate) async fn export(&self, filename: &str) -> bool {
        match self.library.export(Path::new(filename)).await {
            Ok(count) => {
                success!("Exported {} podcasts to {}", count, filename);
                true
            }
            Err(e) => {
                error!("Cannot export to {}: {}", filename, e);
                false
            }
        }
    }
}
