//! CLI runner - executes commands

use crate::call_logs::{AccountCallLogQuery, CallLogsClient, UserCallLogQuery};
use crate::cli::commands::{
    AccountArgs, Cli, Commands, DateArgs, OutputFormat, PagingArgs, UserArgs,
};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::Page;
use crate::query::DateRange;
use serde::Serialize;
use std::future::Future;
use std::io::{self, Write};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Totals of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages fetched
    pub pages: usize,
    /// Records written
    pub records: usize,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
    cancel: CancellationToken,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self::with_cancellation(cli, CancellationToken::new())
    }

    /// Create a runner that stops when `cancel` fires
    pub fn with_cancellation(cli: Cli, cancel: CancellationToken) -> Self {
        Self { cli, cancel }
    }

    /// Token that aborts the current page when cancelled
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<RunSummary> {
        let config = self.load_config()?;
        let client = CallLogsClient::from_config(config.to_http_config())?;

        match &self.cli.command {
            Commands::User(args) => self.user(&client, args).await,
            Commands::Account(args) => self.account(&client, args).await,
        }
    }

    /// Resolve configuration: file, then environment, then flags
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::new(self.cli.base_url.clone().unwrap_or_default()),
        }
        .with_env_overrides()?;

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }

        for (key, value) in &self.cli.headers {
            config = config.header(key, value);
        }

        config.validate()?;
        debug!("Using base URL {}", config.base_url);
        Ok(config)
    }

    async fn user(
        &self,
        client: &CallLogsClient<HttpClient>,
        args: &UserArgs,
    ) -> Result<RunSummary> {
        let mut query = UserCallLogQuery::new(&args.user_id)?
            .dates(date_range(&args.dates))
            .try_page_size(args.paging.page_size)?;
        if let Some(call_type) = args.call_type {
            query = query.call_type(call_type);
        }
        if let Some(number) = &args.phone_number {
            query = query.phone_number(number);
        }

        self.drain(&args.paging, |token| {
            let query = query.clone().page_token(token);
            async move { client.get_for_user_cancellable(&query, &self.cancel).await }
        })
        .await
    }

    async fn account(
        &self,
        client: &CallLogsClient<HttpClient>,
        args: &AccountArgs,
    ) -> Result<RunSummary> {
        let mut query = AccountCallLogQuery::new()
            .dates(date_range(&args.dates))
            .time_type(args.time_type)
            .charged_only(args.charged_only)
            .try_page_size(args.paging.page_size)?;
        if let Some(call_type) = args.call_type {
            query = query.call_type(call_type);
        }
        if let Some(path) = args.path {
            query = query.path(path);
        }
        if let Some(site_id) = &args.site_id {
            query = query.site_id(site_id);
        }

        self.drain(&args.paging, |token| {
            let query = query.clone().page_token(token);
            async move { client.get_for_account_cancellable(&query, &self.cancel).await }
        })
        .await
    }

    /// Fetch pages until the last one, the page limit, or a single page
    /// when `--all` is not set
    async fn drain<T, F, Fut>(&self, paging: &PagingArgs, mut fetch: F) -> Result<RunSummary>
    where
        T: Serialize,
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let mut summary = RunSummary::default();
        let mut token = paging.page_token.clone();

        loop {
            let page = fetch(token.take()).await?;
            summary.pages += 1;
            summary.records += page.len();

            info!(
                page = summary.pages,
                records = page.len(),
                total = ?page.total_records,
                "Fetched page"
            );

            self.write_records(&mut io::stdout().lock(), &page.items)?;
            let Some(next) = page.next_page_token else {
                break;
            };

            let limit_reached = paging.max_pages.is_some_and(|max| summary.pages >= max);
            if !paging.all || limit_reached {
                info!("More pages available, resume with --page-token {next}");
                break;
            }

            token = Some(next);
        }

        info!(pages = summary.pages, records = summary.records, "Finished");
        Ok(summary)
    }

    /// Write one record per line (or per block when pretty)
    fn write_records<T: Serialize, W: Write>(&self, out: &mut W, records: &[T]) -> Result<()> {
        for record in records {
            let line = match self.cli.format {
                OutputFormat::Json => serde_json::to_string(record)?,
                OutputFormat::Pretty => serde_json::to_string_pretty(record)?,
            };
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}

fn date_range(args: &DateArgs) -> DateRange {
    let mut range = DateRange::new();
    if let Some(from) = args.from {
        range = range.since(from);
    }
    if let Some(to) = args.to {
        range = range.until(to);
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    fn runner(args: &[&str]) -> Runner {
        Runner::new(Cli::parse_from(args))
    }

    #[test]
    fn test_write_records_json_lines() {
        let runner = runner(&["call-logs", "account"]);
        let mut out = Vec::new();
        runner
            .write_records(&mut out, &[json!({"id": "a"}), json!({"id": "b"})])
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"id\":\"a\"}\n{\"id\":\"b\"}\n");
    }

    #[test]
    fn test_write_records_pretty() {
        let runner = runner(&["call-logs", "--format", "pretty", "account"]);
        let mut out = Vec::new();
        runner.write_records(&mut out, &[json!({"id": "a"})]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"id\": \"a\"\n}\n");
    }

    #[test]
    fn test_write_records_closed_pipe_is_error() {
        let runner = runner(&["call-logs", "account"]);
        let err = runner
            .write_records(&mut ClosedPipe, &[json!({"id": "a"})])
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_broken_pipe());
    }
}
