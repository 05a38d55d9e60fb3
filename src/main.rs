//! call-logs CLI
//!
//! Command-line interface for fetching call logs

use call_logs::cli::{Cli, Runner};
use clap::Parser;
use tracing::{info, Level};

/// Conventional exit code after SIGINT
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; records go to stdout, logs to stderr
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);

    let cancel = runner.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, cancelling");
            cancel.cancel();
        }
    });

    match runner.run().await {
        Ok(_) => {}
        Err(e) if e.is_broken_pipe() => {}
        Err(e) if e.is_cancelled() => {
            eprintln!("Cancelled");
            std::process::exit(EXIT_CANCELLED);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
