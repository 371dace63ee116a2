use crate::{
    cli::{
        commands::{self, CommandKind, EXIT_COMMANDS, HELP_ALIAS},
        prefix::PrefixTable,
    },
    error,
    management::Library,
    utils,
};

/// Result of dispatching one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was typed.
    Empty,
    Success,
    /// The handler ran and reported a failure.
    Failure,
    WrongArity { command: &'static str },
    /// The command name is an ambiguous abbreviation; holds the candidates.
    Incomplete(Vec<String>),
    NotFound(String),
    Interrupted,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success | Outcome::Empty)
    }
}

/// State of one program run: the library, the abbreviation tables and the
/// result of the last `query`.
pub struct Session<L> {
    pub(crate) library: L,
    table: PrefixTable,
    pub(crate) last_query: Vec<u64>,
    pub(crate) single_command: bool,
    shut_down: bool,
}

impl<L: Library> Session<L> {
    pub fn new(library: L) -> Self {
        Self {
            library,
            table: PrefixTable::build(commands::all_names()),
            last_query: Vec::new(),
            single_command: false,
            shut_down: false,
        }
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn table(&self) -> &PrefixTable {
        &self.table
    }

    pub fn last_query(&self) -> &[u64] {
        &self.last_query
    }

    /// Expands the alias and unambiguous abbreviations; anything else is
    /// returned unchanged.
    pub fn resolve(&self, token: &str) -> String {
        if token == HELP_ALIAS {
            return "help".to_string();
        }
        self.table.resolve(token).unwrap_or(token).to_string()
    }

    pub fn is_exit(&self, token: &str) -> bool {
        EXIT_COMMANDS.contains(&self.resolve(token).as_str())
    }

    /// Resolves the first token and runs the matching handler.
    ///
    /// The command name may be the `?` alias or any unambiguous prefix of a
    /// registered name. Arity is checked against the command's required and
    /// optional parameters before the handler sees anything.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The split command line; the first token names the command
    ///
    /// # Returns
    ///
    /// The [`Outcome`] of the line. Every outcome other than
    /// [`Outcome::Success`] and [`Outcome::Empty`] has already printed one
    /// error line.
    pub async fn dispatch(&mut self, tokens: &[String]) -> Outcome {
        let Some((first, args)) = tokens.split_first() else {
            return Outcome::Empty;
        };

        let name = self.resolve(first);
        if let Some(spec) = commands::find(&name) {
            if !spec.accepts(args.len()) {
                error!(
                    "Wrong argument count for {}. Usage: {}",
                    spec.name,
                    spec.usage()
                );
                return Outcome::WrongArity { command: spec.name };
            }

            tracing::debug!("dispatching {} {:?}", spec.name, args);
            return if self.invoke(spec.kind, args).await {
                Outcome::Success
            } else {
                Outcome::Failure
            };
        }

        if let Some(candidates) = self.table.expansions(&name) {
            error!("Incomplete command; did you mean: {}", candidates.join(", "));
            return Outcome::Incomplete(candidates.to_vec());
        }

        error!("Command not found: {}", first);
        Outcome::NotFound(first.clone())
    }

    /// Like [`Session::dispatch`], but a Ctrl-C while the command runs
    /// abandons it and yields [`Outcome::Interrupted`].
    pub async fn dispatch_interruptible(&mut self, tokens: &[String]) -> Outcome {
        tokio::select! {
            outcome = self.dispatch(tokens) => outcome,
            _ = tokio::signal::ctrl_c() => {
                error!("Interrupted");
                Outcome::Interrupted
            }
        }
    }

    /// Runs exactly one command, then the shutdown hook.
    ///
    /// # Arguments
    ///
    /// * `args` - The command-line arguments after the program name
    pub async fn run_single(&mut self, args: &[String]) -> Outcome {
        self.single_command = true;
        let outcome = self.dispatch_interruptible(args).await;
        self.shutdown().await;
        outcome
    }

    /// Calls the library's shutdown hook; later calls do nothing.
    pub async fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if let Err(e) = self.library.shutdown().await {
            error!("Cannot save podcast library: {}", e);
        }
    }

    async fn invoke(&mut self, kind: CommandKind, args: &[String]) -> bool {
        let arg = |i: usize| args.get(i).map(String::as_str);

        match kind {
            CommandKind::Subscribe => self.subscribe(&args[0], arg(1)).await,
            CommandKind::Unsubscribe => self.unsubscribe(&args[0]).await,
            CommandKind::Rename => self.rename(&args[0], &args[1]).await,
            CommandKind::Rewrite => self.rewrite(&args[0], &args[1]).await,
            CommandKind::Enable => self.set_enabled(&args[0], true).await,
            CommandKind::Disable => self.set_enabled(&args[0], false).await,
            CommandKind::Info => self.info(&args[0]),
            CommandKind::List => self.list(),
            CommandKind::Update => self.update(arg(0)).await,
            CommandKind::Pending => self.pending(arg(0)),
            CommandKind::Episodes => self.episodes(arg(0)),
            CommandKind::Download => self.download(arg(0)).await,
            CommandKind::Fetch => self.fetch(args).await,
            CommandKind::Details => self.details(&args[0]),
            CommandKind::Mark => self.mark(&args[0], &args[1]).await,
            CommandKind::Rm => self.rm(&args[0]).await,
            CommandKind::Query => self.query(args),
            CommandKind::Apply => self.apply(args).await,
            CommandKind::Import => self.import(&args[0]).await,
            CommandKind::Export => self.export(&args[0]).await,
            CommandKind::Set => self.set(arg(0), arg(1)).await,
            CommandKind::Version => self.version().await,
            CommandKind::Help => self.help(arg(0)),
        }
    }

    /// Normalizes `url` and checks it is subscribed, reporting otherwise.
    pub(crate) fn require_podcast(&self, url: &str) -> Option<String> {
        let Some(normalized) = utils::normalize_url(url) else {
            error!("Invalid URL: {}", url);
            return None;
        };

        if self.library.podcast(&normalized).is_none() {
            error!("Not subscribed to {}", normalized);
            return None;
        }

        Some(normalized)
    }

    /// Parses an episode ID and checks the episode exists, reporting otherwise.
    pub(crate) fn require_episode(&self, raw: &str) -> Option<u64> {
        match utils::parse_episode_id(raw) {
            Some(id) if self.library.episode(id).is_some() => Some(id),
            _ => {
                error!("Invalid episode ID: {}", raw);
                None
            }
        }
    }
}
