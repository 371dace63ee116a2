use std::fmt::Write;

use crate::{
    cli::Session,
    error, info,
    management::{
        Library,
        settings::{KEY_COLORS, KEY_PAGING},
    },
    output, success, warning,
};

impl<L: Library> Session<L> {
    pub(crate) async fn set(&mut self, key: Option<&str>, value: Option<&str>) -> bool {
        let (Some(key), Some(value)) = (key, value) else {
            return self.show_settings(key);
        };

        match self.library.set_setting(key, value).await {
            Ok(value) => {
                if key == KEY_COLORS {
                    output::configure_colors(self.library.settings().flag(KEY_COLORS));
                }
                success!("{} = {}", key, value);
                true
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    fn show_settings(&self, filter: Option<&str>) -> bool {
        let settings = self.library.settings();
        let matches = settings.search(filter);
        if matches.is_empty() {
            error!("Invalid config key: {}", filter.unwrap_or_default());
            return false;
        }

        let mut text = String::new();
        for (key, value) in matches {
            let _ = writeln!(text, "{:<25} {}", key, value);
        }
        output::page(&text, settings.flag(KEY_PAGING));
        true
    }

    pub(crate) async fn version(&self) -> bool {
        info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

        match self.library.newer_version().await {
            Ok(Some(latest)) => {
                warning!("A newer version is available: {}", latest);
                true
            }
            Ok(None) => {
                success!("You are using the latest version");
                true
            }
            Err(e) => {
                error!("Cannot check for updates: {}", e);
                false
            }
        }
    }
}
