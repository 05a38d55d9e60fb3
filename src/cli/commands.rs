//! CLI commands and argument parsing

use crate::call_logs::{CallType, PathType, TimeType};
use chrono::NaiveDate;
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fetch phone call logs from the REST API
#[derive(Parser, Debug)]
#[command(name = "call-logs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL, overrides the config file and environment
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Extra header sent with every request (KEY=VALUE, repeatable)
    #[arg(short = 'H', long = "header", global = true, value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a single user's call logs
    User(UserArgs),

    /// List the account's call logs
    Account(AccountArgs),
}

/// Arguments of the `user` command
#[derive(Args, Debug, Clone)]
pub struct UserArgs {
    /// User ID, email address or `me`
    pub user_id: String,

    #[command(flatten)]
    pub dates: DateArgs,

    /// Call type filter (all, missed)
    #[arg(long = "type")]
    pub call_type: Option<CallType>,

    /// Only calls with this phone number
    #[arg(long)]
    pub phone_number: Option<String>,

    #[command(flatten)]
    pub paging: PagingArgs,
}

/// Arguments of the `account` command
#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
    #[command(flatten)]
    pub dates: DateArgs,

    /// Call type filter (all, missed)
    #[arg(long = "type")]
    pub call_type: Option<CallType>,

    /// Call path filter (e.g. voiceMail, callQueue, pstn)
    #[arg(long)]
    pub path: Option<PathType>,

    /// Timestamp the date range applies to (startTime, endTime)
    #[arg(long, default_value = "startTime")]
    pub time_type: TimeType,

    /// Only calls made through this site
    #[arg(long)]
    pub site_id: Option<String>,

    /// Only calls that incurred a charge
    #[arg(long)]
    pub charged_only: bool,

    #[command(flatten)]
    pub paging: PagingArgs,
}

/// Date range arguments (YYYY-MM-DD)
#[derive(Args, Debug, Clone, Default)]
pub struct DateArgs {
    /// Start date
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End date
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

/// Pagination arguments
#[derive(Args, Debug, Clone)]
pub struct PagingArgs {
    /// Records per page (1-300)
    #[arg(long, default_value = "30")]
    pub page_size: u32,

    /// Resume from a continuation token
    #[arg(long)]
    pub page_token: Option<String>,

    /// Follow continuation tokens until the last page
    #[arg(long)]
    pub all: bool,

    /// Stop after this many pages (at least 1)
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub max_pages: Option<usize>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Parse a `KEY=VALUE` header argument
fn parse_header(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty header name in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_command() {
        let cli = Cli::try_parse_from([
            "call-logs",
            "--base-url",
            "http://localhost:9000",
            "-H",
            "Authorization=Bearer t",
            "user",
            "me",
            "--from",
            "2024-01-01",
            "--type",
            "missed",
            "--page-size",
            "100",
            "--all",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(
            cli.headers,
            vec![("Authorization".to_string(), "Bearer t".to_string())]
        );
        let Commands::User(args) = cli.command else {
            panic!("Expected user command");
        };
        assert_eq!(args.user_id, "me");
        assert_eq!(args.dates.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(args.call_type, Some(CallType::Missed));
        assert_eq!(args.paging.page_size, 100);
        assert!(args.paging.all);
    }

    #[test]
    fn test_parse_account_defaults() {
        let cli = Cli::try_parse_from(["call-logs", "account"]).unwrap();
        let Commands::Account(args) = cli.command else {
            panic!("Expected account command");
        };
        assert_eq!(args.time_type, TimeType::StartTime);
        assert!(!args.charged_only);
        assert_eq!(args.paging.page_size, 30);
        assert!(args.path.is_none());
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_rejects_unknown_enum_value() {
        assert!(Cli::try_parse_from(["call-logs", "account", "--path", "nowhere"]).is_err());
        assert!(Cli::try_parse_from(["call-logs", "account", "--from", "2024-13-01"]).is_err());
    }

    #[test]
    fn test_parse_max_pages() {
        let cli = Cli::try_parse_from(["call-logs", "account", "--all", "--max-pages", "2"]).unwrap();
        let Commands::Account(args) = cli.command else {
            panic!("Expected account command");
        };
        assert_eq!(args.paging.max_pages, Some(2));

        assert!(Cli::try_parse_from(["call-logs", "account", "--max-pages", "0"]).is_err());
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("X-Trace = abc=1").unwrap(),
            ("X-Trace".to_string(), "abc=1".to_string())
        );
        assert!(parse_header("no-equals").is_err());
        assert!(parse_header("=value").is_err());
    }
}
