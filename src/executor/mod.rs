//! Paginated query executor
//!
//! Turns one [`QuerySpec`] into one GET request and one decoded [`Page`].
//!
//! The executor holds no mutable state: concurrent `execute` calls share
//! nothing but the transport, and each observes its own cancellation
//! token. It never retries and never follows continuation tokens on its
//! own; callers loop over pages explicitly.

use crate::error::{Error, Result};
use crate::http::{PreparedRequest, Transport};
use crate::pagination::{decode_page, EnvelopeFormat, Page};
use crate::query::QuerySpec;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Executes single-page queries against an injected transport
#[derive(Debug, Clone)]
pub struct PaginatedQueryExecutor<C> {
    transport: C,
    envelope: EnvelopeFormat,
}

impl<C: Transport> PaginatedQueryExecutor<C> {
    /// Create an executor decoding envelopes in the given format
    pub fn new(transport: C, envelope: EnvelopeFormat) -> Self {
        Self {
            transport,
            envelope,
        }
    }

    /// The injected transport
    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// The envelope format used for decoding
    pub fn envelope(&self) -> &EnvelopeFormat {
        &self.envelope
    }

    /// Fetch and decode exactly one page
    ///
    /// Returns [`Error::Cancelled`] without touching the transport when the
    /// token is already cancelled, and abandons the in-flight request when
    /// it is cancelled while waiting.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        spec: QuerySpec,
        cancel: &CancellationToken,
    ) -> Result<Page<T>> {
        if cancel.is_cancelled() {
            debug!("Query on '{}' cancelled before dispatch", spec.path());
            return Err(Error::Cancelled);
        }

        let request = PreparedRequest::get(spec.path(), spec.query_pairs());
        debug!(
            page_size = spec.page_size().get(),
            continuation = spec.page_token().is_some(),
            "Executing query on '{}'",
            spec.path()
        );

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Query on '{}' cancelled in flight", spec.path());
                return Err(Error::Cancelled);
            }
            response = self.transport.send(request) => response?,
        };

        decode_page(&response.body, &self.envelope)
    }
}
