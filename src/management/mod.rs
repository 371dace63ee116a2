//! The podcast library behind the commands: the [`Library`] trait the
//! dispatcher talks to, and its on-disk implementation.

mod library;
pub mod settings;
mod store;

pub use library::DATABASE_FILE;
pub use library::Library;
pub use library::PodcastLibrary;
pub use library::SETTINGS_FILE;
pub use settings::SettingValue;
pub use settings::SettingsManager;
pub use store::PodcastStore;
