//! Output formatting: colors, human readable sizes, in-place action status
//! lines and paging of long listings.

use std::{
    io::{IsTerminal, Write},
    process::{Command, Stdio},
    time::Duration,
};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config;

const SIZE_UNITS: [&str; 5] = ["bytes", "KB", "MB", "GB", "TB"];
const ACTION_WIDTH: usize = 60;

/// Switches colorization on only for interactive terminals that allow it.
pub fn configure_colors(enabled: bool) {
    colored::control::set_override(enabled && std::io::stdout().is_terminal());
}

/// Renders a byte count with binary prefixes and one decimal place.
///
/// `0` becomes `"0.0 bytes"`, `1536` becomes `"1.5 KB"`.
pub fn format_filesize(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, SIZE_UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionStatus {
    /// Still running; completed fraction if known.
    Running(Option<f64>),
    Done,
    Failed,
}

/// Renders the fixed-width status line of an action.
pub fn action_line(label: &str, status: ActionStatus) -> String {
    let mut label: String = label.chars().take(ACTION_WIDTH).collect();
    let pad = ACTION_WIDTH - label.chars().count();
    label.extend(std::iter::repeat_n(' ', pad));

    let status = match status {
        ActionStatus::Running(Some(fraction)) => {
            format!("[{:>5.1}%]", fraction.clamp(0.0, 1.0) * 100.0)
        }
        ActionStatus::Running(None) => "[ .... ]".to_string(),
        ActionStatus::Done => format!("[{}]", " DONE ".green().bold()),
        ActionStatus::Failed => format!("[{}]", " FAIL ".red().bold()),
    };

    format!("{} {}", label, status)
}

/// A labelled, long-running operation whose status line is redrawn in place.
pub struct Action {
    label: String,
    bar: ProgressBar,
}

impl Action {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
        );
        bar.set_message(action_line(&label, ActionStatus::Running(None)));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { label, bar }
    }

    pub fn update(&self, progress: Option<f64>) {
        self.bar
            .set_message(action_line(&self.label, ActionStatus::Running(progress)));
    }

    pub fn finish(self, success: bool) -> bool {
        self.bar.finish_and_clear();
        let status = if success {
            ActionStatus::Done
        } else {
            ActionStatus::Failed
        };
        println!("{}", action_line(&self.label, status));
        success
    }
}

/// Decides whether `lines` lines of output need a pager on a terminal with
/// `rows` rows.
pub fn should_page(lines: usize, rows: Option<u16>) -> bool {
    match rows {
        Some(rows) => lines >= usize::from(rows),
        None => false,
    }
}

/// Prints `text`, through the pager when it does not fit on the terminal.
pub fn page(text: &str, paging: bool) {
    let rows = terminal_size::terminal_size().map(|(_, terminal_size::Height(h))| h);
    let interactive = std::io::stdout().is_terminal();

    if paging && interactive && should_page(text.lines().count(), rows) {
        if let Err(e) = run_pager(text) {
            tracing::debug!("pager failed: {}", e);
            print!("{}", text);
        }
        return;
    }

    print!("{}", text);
}

fn run_pager(text: &str) -> std::io::Result<()> {
    let command = config::pager();
    let mut child = Command::new(&command[0])
        .args(&command[1..])
        .stdin(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        // The user may quit the pager before reading everything.
        let _ = stdin.write_all(text.as_bytes());
    }
    child.wait()?;
    Ok(())
}
