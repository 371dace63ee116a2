use std::{io::IsTerminal, process::ExitCode};

use clap::{
    CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use tracing_subscriber::{EnvFilter, fmt};

use podcli::{
    cli::{Outcome, Session},
    config, error,
    management::{Library, PodcastLibrary, settings::KEY_COLORS},
    output,
    shell::{self, RustylineSource},
};

/// Exit status after an interrupted single command (128 + SIGINT).
const EXIT_INTERRUPTED: u8 = 130;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  after_help = "Without COMMAND an interactive shell is started. Run `podcli help` for the command list.",
)]
struct Cli {
    /// Print debug diagnostics
    #[clap(short, long)]
    verbose: bool,

    /// Command to run, followed by its arguments; commands may be abbreviated
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("podcli={}", level)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }
    init_logging(cli.verbose);

    let library = match PodcastLibrary::open().await {
        Ok(library) => library,
        Err(e) => {
            error!("Cannot open podcast library: {}", e);
            return ExitCode::FAILURE;
        }
    };
    output::configure_colors(library.settings().flag(KEY_COLORS));

    let mut session = Session::new(library);

    if !cli.command.is_empty() {
        return match session.run_single(&cli.command).await {
            Outcome::Interrupted => ExitCode::from(EXIT_INTERRUPTED),
            outcome if outcome.is_success() => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        };
    }

    if !std::io::stdin().is_terminal() {
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    }

    let mut source = match RustylineSource::new(session.table()) {
        Ok(source) => source,
        Err(e) => {
            error!("Cannot start interactive shell: {}", e);
            return ExitCode::FAILURE;
        }
    };
    shell::run_shell(&mut session, &mut source).await;
    ExitCode::SUCCESS
}
