use std::fmt::Write;

use crate::{
    cli::{Session, episodes::episode_line},
    error, info,
    management::{Library, settings::KEY_PAGING},
    output,
    query::Query,
    success,
};

/// Command shapes `apply` may replay over the last query result.
const APPLY_ACTIONS: [&[&str]; 5] = [
    &["fetch"],
    &["mark", "new"],
    &["mark", "old"],
    &["rm"],
    &["details"],
];

impl<L: Library> Session<L> {
    pub(crate) fn query(&mut self, words: &[String]) -> bool {
        self.last_query.clear();

        let query = match Query::from_words(words) {
            Ok(query) => query,
            Err(e) => {
                error!("{}", e);
                return false;
            }
        };

        let mut text = String::new();
        let mut matched = Vec::new();
        for podcast in self.library.podcasts() {
            for episode in podcast.episodes.iter().filter(|e| query.matches(podcast, e)) {
                let _ = writeln!(text, "{}", episode_line(podcast, episode));
                matched.push(episode.id);
            }
        }

        if matched.is_empty() {
            info!("0 episodes match the query");
            return true;
        }

        output::page(&text, self.library.settings().flag(KEY_PAGING));
        if self.single_command {
            info!("{} episodes match the query", matched.len());
        } else {
            success!(
                "{} episodes match the query; use apply ACTION to act on them",
                matched.len()
            );
        }
        self.last_query = matched;
        true
    }

    /// Replays an action over every episode of the last query, one command
    /// line per episode, through the full dispatcher. Keeps going after a
    /// failing episode and reports failure if any of them failed.
    pub(crate) async fn apply(&mut self, action: &[String]) -> bool {
        if self.last_query.is_empty() {
            error!("Empty query result; run query first");
            return false;
        }

        let words: Vec<&str> = action.iter().map(String::as_str).collect();
        if !APPLY_ACTIONS.iter().any(|a| *a == words.as_slice()) {
            let names: Vec<String> = APPLY_ACTIONS.iter().map(|a| a.join(" ")).collect();
            error!(
                "Invalid action keyword: {} (expected one of: {})",
                words.join(" "),
                names.join(", ")
            );
            return false;
        }

        let mut all_ok = true;
        for id in self.last_query.clone() {
            let mut tokens: Vec<String> = action.to_vec();
            tokens.push(id.to_string());
            let outcome = Box::pin(self.dispatch(&tokens)).await;
            all_ok &= outcome.is_success();
        }
        all_ok
    }
}
