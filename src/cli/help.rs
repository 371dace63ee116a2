use std::fmt::Write;

use crate::{
    cli::{
        Session,
        commands::{self, COMMANDS, EXIT_COMMANDS, HELP_ALIAS},
    },
    error,
    management::{Library, settings::KEY_PAGING},
    output,
};

impl<L: Library> Session<L> {
    pub(crate) fn help(&self, command: Option<&str>) -> bool {
        let Some(command) = command else {
            output::page(&overview(), self.library.settings().flag(KEY_PAGING));
            return true;
        };

        let name = self.resolve(command);
        if let Some(spec) = commands::find(&name) {
            println!("{}\n    {}", spec.usage(), spec.summary);
            return true;
        }

        if let Some(candidates) = self.table().expansions(&name) {
            error!("Incomplete command; did you mean: {}", candidates.join(", "));
        } else {
            error!("Command not found: {}", command);
        }
        false
    }
}

fn overview() -> String {
    let width = COMMANDS
        .iter()
        .map(|c| c.usage().len())
        .max()
        .unwrap_or(0);

    let mut text = String::new();
    let _ = writeln!(text, "Commands:");
    for spec in COMMANDS {
        let _ = writeln!(text, "  {:<width$}  {}", spec.usage(), spec.summary, width = width);
    }
    let _ = writeln!(
        text,
        "\nCommands may be abbreviated as long as the abbreviation is unique."
    );
    let _ = writeln!(
        text,
        "'{}' is short for help; {} leave the shell.",
        HELP_ALIAS,
        EXIT_COMMANDS.join(", ")
    );
    text
}
