//! Call-log API client

use super::types::{
    AccountCallLog, AccountCallLogQuery, UserCallLog, UserCallLogQuery, CALL_LOGS_FIELD,
};
use crate::error::Result;
use crate::executor::PaginatedQueryExecutor;
use crate::http::{HttpClient, HttpClientConfig, Transport};
use crate::pagination::{EnvelopeFormat, Page};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fetches call-log pages for a user or for the whole account
///
/// Each method fetches one page. To read everything, call again with the
/// returned [`Page::next_page_token`] until it is `None`.
#[derive(Debug, Clone)]
pub struct CallLogsClient<C> {
    executor: PaginatedQueryExecutor<C>,
}

impl CallLogsClient<HttpClient> {
    /// Create a client over a reqwest transport
    pub fn from_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::with_config(config)?))
    }
}

impl<C: Transport> CallLogsClient<C> {
    /// Create a client over an existing transport
    pub fn new(transport: C) -> Self {
        Self {
            executor: PaginatedQueryExecutor::new(transport, EnvelopeFormat::new(CALL_LOGS_FIELD)),
        }
    }

    /// The underlying executor
    pub fn executor(&self) -> &PaginatedQueryExecutor<C> {
        &self.executor
    }

    /// Fetch one page of a user's call logs
    pub async fn get_for_user(&self, query: &UserCallLogQuery) -> Result<Page<UserCallLog>> {
        self.get_for_user_cancellable(query, &CancellationToken::new())
            .await
    }

    /// Fetch one page of a user's call logs, abandoning it on cancellation
    pub async fn get_for_user_cancellable(
        &self,
        query: &UserCallLogQuery,
        cancel: &CancellationToken,
    ) -> Result<Page<UserCallLog>> {
        let spec = query.to_spec()?;
        debug!(user_id = query.user_id(), "Fetching user call logs");
        self.executor.execute(spec, cancel).await
    }

    /// Fetch one page of the account's call logs
    pub async fn get_for_account(
        &self,
        query: &AccountCallLogQuery,
    ) -> Result<Page<AccountCallLog>> {
        self.get_for_account_cancellable(query, &CancellationToken::new())
            .await
    }

    /// Fetch one page of the account's call logs, abandoning it on cancellation
    pub async fn get_for_account_cancellable(
        &self,
        query: &AccountCallLogQuery,
        cancel: &CancellationToken,
    ) -> Result<Page<AccountCallLog>> {
        let spec = query.to_spec()?;
        debug!("Fetching account call logs");
        self.executor.execute(spec, cancel).await
    }
}
