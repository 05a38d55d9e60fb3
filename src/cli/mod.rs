//! CLI module
//!
//! Command-line interface for fetching call logs.
//!
//! # Commands
//!
//! - `user` - Call logs of a single user
//! - `account` - Call logs of the whole account
//!
//! Both fetch one page by default; `--all` follows continuation tokens.

mod commands;
mod runner;

pub use commands::{AccountArgs, Cli, Commands, DateArgs, OutputFormat, PagingArgs, UserArgs};
pub use runner::{RunSummary, Runner};
