//! # CLI Module
//!
//! The command layer of podcli. Every command the program understands is
//! declared once in a static table ([`commands::COMMANDS`]); the same table
//! drives abbreviation resolution, argument count validation, help output and
//! tab completion.
//!
//! ## Dispatch
//!
//! A command line arrives as a list of tokens. [`Session::dispatch`]:
//!
//! 1. resolves the first token through the [`PrefixTable`] (`sub` becomes
//!    `subscribe`, `?` becomes `help`),
//! 2. checks the remaining token count against the command's parameters,
//! 3. runs the handler and maps its boolean result to an [`Outcome`].
//!
//! Ambiguous abbreviations are reported with their candidates in bracket
//! notation, e.g. `d` lists `[de]tails, [di]sable, [do]wnload`.
//!
//! ## Handlers
//!
//! Handlers live in `impl Session` blocks grouped by topic:
//!
//! - `podcasts` - subscribe, unsubscribe, rename, rewrite, enable, disable, info, list
//! - `episodes` - update, pending, episodes, download, fetch, details, mark, rm
//! - `query` - query and apply
//! - `transfer` - OPML import and export
//! - `settings` - set and version
//! - `help` - help
//!
//! Handlers report problems themselves through the output macros and return
//! `false`; they never abort the program.

pub mod commands;
mod episodes;
mod help;
mod podcasts;
pub mod prefix;
mod query;
mod session;
mod settings;
mod transfer;

pub use prefix::PrefixTable;
pub use session::{Outcome, Session};
