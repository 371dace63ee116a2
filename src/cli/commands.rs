//! The static command registry.

/// Words that end the interactive shell. They take part in abbreviation
/// resolution like the regular command names.
pub const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "bye"];

/// Permanent alias for `help`.
pub const HELP_ALIAS: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Subscribe,
    Unsubscribe,
    Rename,
    Rewrite,
    Enable,
    Disable,
    Info,
    List,
    Update,
    Pending,
    Episodes,
    Download,
    Fetch,
    Details,
    Mark,
    Rm,
    Query,
    Apply,
    Import,
    Export,
    Set,
    Version,
    Help,
}

#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub kind: CommandKind,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    /// Name of a trailing parameter that takes any number of values.
    pub variadic: Option<&'static str>,
    /// The first parameter is a subscribed feed URL (drives completion).
    pub takes_url: bool,
    pub summary: &'static str,
}

impl CommandSpec {
    pub fn min_args(&self) -> usize {
        self.required.len()
    }

    /// `None` when the command takes a variable-length tail.
    pub fn max_args(&self) -> Option<usize> {
        match self.variadic {
            Some(_) => None,
            None => Some(self.required.len() + self.optional.len()),
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_args() && self.max_args().is_none_or(|max| count <= max)
    }

    pub fn usage(&self) -> String {
        let mut usage = self.name.to_string();
        for param in self.required {
            usage.push(' ');
            usage.push_str(param);
        }
        for param in self.optional {
            usage.push_str(&format!(" [{}]", param));
        }
        if let Some(param) = self.variadic {
            usage.push_str(&format!(" [{}...]", param));
        }
        usage
    }
}

const fn command(
    name: &'static str,
    kind: CommandKind,
    required: &'static [&'static str],
    optional: &'static [&'static str],
    summary: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        kind,
        required,
        optional,
        variadic: None,
        takes_url: false,
        summary,
    }
}

const fn url_command(
    name: &'static str,
    kind: CommandKind,
    required: &'static [&'static str],
    optional: &'static [&'static str],
    summary: &'static str,
) -> CommandSpec {
    CommandSpec {
        takes_url: true,
        ..command(name, kind, required, optional, summary)
    }
}

const fn variadic_command(
    name: &'static str,
    kind: CommandKind,
    required: &'static [&'static str],
    variadic: &'static str,
    summary: &'static str,
) -> CommandSpec {
    CommandSpec {
        variadic: Some(variadic),
        ..command(name, kind, required, &[], summary)
    }
}

pub static COMMANDS: &[CommandSpec] = &[
    url_command("subscribe", CommandKind::Subscribe, &["URL"], &["TITLE"], "Subscribe to a new feed"),
    url_command("unsubscribe", CommandKind::Unsubscribe, &["URL"], &[], "Unsubscribe from a feed"),
    url_command("rename", CommandKind::Rename, &["URL", "TITLE"], &[], "Rename a podcast"),
    url_command("rewrite", CommandKind::Rewrite, &["URL", "NEW_URL"], &[], "Change the feed URL of a podcast"),
    url_command("enable", CommandKind::Enable, &["URL"], &[], "Include a podcast in updates and downloads"),
    url_command("disable", CommandKind::Disable, &["URL"], &[], "Exclude a podcast from updates and downloads"),
    url_command("info", CommandKind::Info, &["URL"], &[], "Show information about a podcast"),
    command("list", CommandKind::List, &[], &[], "List all subscribed podcasts"),
    url_command("update", CommandKind::Update, &[], &["URL"], "Check for new episodes"),
    url_command("pending", CommandKind::Pending, &[], &["URL"], "List new episodes"),
    url_command("episodes", CommandKind::Episodes, &[], &["URL"], "List episodes with their IDs"),
    url_command("download", CommandKind::Download, &[], &["URL"], "Download new episodes"),
    variadic_command("fetch", CommandKind::Fetch, &["ID"], "ID", "Download episodes by ID"),
    command("details", CommandKind::Details, &["ID"], &[], "Show details of an episode"),
    command("mark", CommandKind::Mark, &["new|old", "ID"], &[], "Mark an episode as new or old"),
    command("rm", CommandKind::Rm, &["ID"], &[], "Delete a downloaded episode"),
    variadic_command("query", CommandKind::Query, &["EXPR"], "EXPR", "Find episodes matching a query"),
    variadic_command("apply", CommandKind::Apply, &["ACTION"], "ARG", "Run fetch, mark new, mark old, rm or details on the last query result"),
    command("import", CommandKind::Import, &["FILE_OR_URL"], &[], "Subscribe to all feeds of an OPML list"),
    command("export", CommandKind::Export, &["FILE"], &[], "Write subscriptions to an OPML file"),
    command("set", CommandKind::Set, &[], &["KEY", "VALUE"], "Show or change configuration"),
    command("version", CommandKind::Version, &[], &[], "Show version and check for updates"),
    command("help", CommandKind::Help, &[], &["COMMAND"], "Show help for all or one command"),
];

pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Every name the abbreviation tables are built from.
pub fn all_names() -> impl Iterator<Item = &'static str> {
    COMMANDS
        .iter()
        .map(|c| c.name)
        .chain(EXIT_COMMANDS.iter().copied())
}
