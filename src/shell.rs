//! Interactive read-eval-print loop.
//!
//! The shell reads one line at a time from a [`LineSource`], splits it with
//! shell quoting rules and hands the tokens to [`Session::dispatch_interruptible`].
//! It ends on end-of-input or an exit word (`quit`, `exit`, `bye` or any
//! unique abbreviation of them) and then runs the library's shutdown hook once.
//!
//! [`RustylineSource`] is the terminal implementation with history and tab
//! completion. Completion knows every command name and, for the commands
//! whose first parameter is a feed URL, the URLs of the current subscriptions.

use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
};

use rustyline::{
    Config, Context, Editor, Helper,
    completion::{Completer, Pair},
    config::CompletionType,
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
};

use crate::{
    cli::{PrefixTable, Session, commands},
    error, info,
    management::Library,
};

pub const PROMPT: &str = "podcli> ";

/// What reading one line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// Ctrl-D or a closed input stream.
    Eof,
}

/// Where the shell gets its input from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> ReadResult;

    /// Called with the subscribed feed URLs whenever they may have changed.
    fn set_urls(&mut self, _urls: Vec<String>) {}
}

/// Runs the shell until end-of-input or an exit word.
pub async fn run_shell<L: Library, S: LineSource>(session: &mut Session<L>, source: &mut S) {
    info!(
        "{} {} - type help for a list of commands",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    source.set_urls(subscribed_urls(session));

    loop {
        let line = match source.read_line(PROMPT) {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                info!("Interrupted; type quit to leave");
                continue;
            }
            ReadResult::Eof => break,
        };

        let tokens = match shell_words::split(&line) {
            Ok(tokens) => tokens,
            Err(e) => {
                error!("Syntax error: {}", e);
                continue;
            }
        };

        if tokens.first().is_some_and(|first| session.is_exit(first)) {
            break;
        }

        let outcome = session.dispatch_interruptible(&tokens).await;
        tracing::debug!("shell command finished: {:?}", outcome);
        source.set_urls(subscribed_urls(session));
    }

    session.shutdown().await;
}

fn subscribed_urls<L: Library>(session: &Session<L>) -> Vec<String> {
    session
        .library()
        .podcasts()
        .iter()
        .map(|p| p.url.clone())
        .collect()
}

/// Terminal line source backed by rustyline.
pub struct RustylineSource {
    editor: Editor<PodcastCompleter, DefaultHistory>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl RustylineSource {
    pub fn new(table: &PrefixTable) -> rustyline::Result<Self> {
        let urls = Arc::new(Mutex::new(Vec::new()));
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(PodcastCompleter::new(table.clone(), Arc::clone(&urls))));
        Ok(Self { editor, urls })
    }
}

impl LineSource for RustylineSource {
    fn read_line(&mut self, prompt: &str) -> ReadResult {
        match self.editor.readline(prompt) {
            Ok(line) => ReadResult::Line(line),
            Err(ReadlineError::Interrupted) => ReadResult::Interrupted,
            Err(ReadlineError::Eof) => ReadResult::Eof,
            Err(e) => {
                error!("Cannot read input: {}", e);
                ReadResult::Eof
            }
        }
    }

    fn set_urls(&mut self, urls: Vec<String>) {
        if let Ok(mut current) = self.urls.lock() {
            *current = urls;
        }
    }
}

/// Tab completion for command names and feed URLs.
pub struct PodcastCompleter {
    commands: Vec<String>,
    table: PrefixTable,
    urls: Arc<Mutex<Vec<String>>>,
}

impl PodcastCompleter {
    pub fn new(table: PrefixTable, urls: Arc<Mutex<Vec<String>>>) -> Self {
        let mut commands: Vec<String> = commands::all_names().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self {
            commands,
            table,
            urls,
        }
    }

    /// Candidates for the word starting at `start` in `line`.
    pub fn candidates(&self, line: &str, start: usize) -> Vec<String> {
        let (Some(before), Some(prefix)) = (line.get(..start), line.get(start..)) else {
            return Vec::new();
        };
        let before: Vec<&str> = before.split_whitespace().collect();

        match before.as_slice() {
            [] => self
                .commands
                .iter()
                .filter(|c| c.starts_with(prefix))
                .cloned()
                .collect(),
            [command] => {
                let name = self.table.resolve(command).unwrap_or(*command);
                if !commands::find(name).is_some_and(|spec| spec.takes_url) {
                    return Vec::new();
                }
                let urls = self.urls.lock().map(|u| u.clone()).unwrap_or_default();
                urls.into_iter().filter(|u| u.starts_with(prefix)).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Byte offset where the last word of `line` begins.
///
/// Any Unicode whitespace separates words, so the offset always falls on a
/// character boundary even after a multi-byte space such as U+00A0.
pub fn word_start(line: &str) -> usize {
    line.char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

impl Helper for PodcastCompleter {}

impl Completer for PodcastCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let start = word_start(line);

        let matches = self
            .candidates(line, start)
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();

        Ok((start, matches))
    }
}

impl Hinter for PodcastCompleter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        // Only the command word, and only once it is two characters long.
        if pos < line.len() || line.len() < 2 || line.contains(char::is_whitespace) {
            return None;
        }

        self.commands
            .iter()
            .find(|c| c.starts_with(line) && c.len() > line.len())
            .map(|c| c[line.len()..].to_string())
    }
}

impl Highlighter for PodcastCompleter {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        use colored::Colorize;
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for PodcastCompleter {}
