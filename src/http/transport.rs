//! Transport abstraction
//!
//! The executor never talks to reqwest directly. It receives a
//! [`Transport`] at construction, which keeps tests free of sockets and
//! lets callers share one connection pool across executors.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

/// A fully rendered outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the transport's base URL
    pub path: String,
    /// Query pairs in emission order
    pub query: Vec<(String, String)>,
}

impl PreparedRequest {
    /// Create a GET request
    pub fn get(path: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query,
        }
    }

    /// Look up the first value sent for a query key
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A successful response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl TransportResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one request and returns the body of a successful response
///
/// Implementations must be safe to call concurrently and must map non-2xx
/// responses to [`Error::RequestFailed`](crate::Error::RequestFailed).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request exactly once
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<'a, T: Transport + ?Sized> Transport for &'a T {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse> {
        (**self).send(request).await
    }
}
