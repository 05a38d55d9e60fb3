//! HTTP module
//!
//! Provides the transport capability injected into the executor.
//!
//! # Features
//!
//! - **Transport trait**: one async `send` per request, no hidden retries
//! - **reqwest client**: base URL joining, default headers, timeouts
//! - **Error classification**: non-2xx responses keep their status and body

mod client;
mod transport;

pub use client::{default_user_agent, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use transport::{PreparedRequest, Transport, TransportResponse};
