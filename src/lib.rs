//! # call-logs
//!
//! Typed, token-paginated client for phone call-log REST endpoints.
//!
//! ## Features
//!
//! - **Validated queries**: page size and arguments are checked before any I/O
//! - **Parameter omission**: unset optional parameters never reach the wire
//! - **Canonical wire strings**: enumerations serialize by name, not ordinal
//! - **One page per call**: continuation tokens are handed back to the caller
//! - **Cooperative cancellation**: per call, via `CancellationToken`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use call_logs::call_logs::{CallLogsClient, CallType, UserCallLogQuery};
//! use call_logs::http::HttpClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> call_logs::Result<()> {
//!     let client = CallLogsClient::from_config(
//!         HttpClientConfig::builder()
//!             .base_url("https://api.example.com/v2")
//!             .header("Authorization", "Bearer ...")
//!             .build(),
//!     )?;
//!
//!     let mut query = UserCallLogQuery::new("me")?.call_type(CallType::Missed);
//!     loop {
//!         let page = client.get_for_user(&query).await?;
//!         for log in &page.items {
//!             println!("{} {:?}", log.id, log.caller_number);
//!         }
//!         match page.next_page_token {
//!             Some(token) => query = query.page_token(Some(token)),
//!             None => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │   CallLogsClient: get_for_user / get_for_account         │
//! └──────────────────────────────────────────────────────────┘
//!                              │ QuerySpec
//! ┌──────────────────────────────────────────────────────────┐
//! │   PaginatedQueryExecutor: validate → send → decode page  │
//! └──────────────────────────────────────────────────────────┘
//!                              │ PreparedRequest
//! ┌──────────────────────────────────────────────────────────┐
//! │   Transport (HttpClient over reqwest, or any injected)   │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query specifications and validation
pub mod query;

/// Paginated response envelopes
pub mod pagination;

/// HTTP transport
pub mod http;

/// Single-page query execution
pub mod executor;

/// Call-log endpoints
pub mod call_logs;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use executor::PaginatedQueryExecutor;
pub use pagination::{EnvelopeFormat, Page};
pub use query::{DateRange, PageSize, QuerySpec};
pub use types::{QueryValue, WireEnum};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
