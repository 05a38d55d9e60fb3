//! Pagination module
//!
//! Decodes token-paginated response envelopes into typed pages.
//!
//! # Overview
//!
//! The backing API wraps each page in a JSON object holding the records
//! under an endpoint-specific key, an optional continuation token and an
//! optional total count. Walking across pages is left to the caller: pass
//! [`Page::next_page_token`] back into the next query until it is `None`.

mod types;

pub use types::{decode_page, EnvelopeFormat, Page};
