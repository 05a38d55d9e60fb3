//! Query module
//!
//! Builds the immutable, validated description of one page request.
//!
//! # Overview
//!
//! A [`QuerySpec`] is built per call and consumed exactly once by the
//! executor. Validation happens while building, so an invalid page size
//! never reaches any network code. Parameters are `Option<QueryValue>`;
//! absent values are dropped when the request is emitted.

mod types;

pub use types::{
    DateRange, PageSize, QuerySpec, QuerySpecBuilder, PAGE_SIZE_PARAM, PAGE_TOKEN_PARAM,
};

#[cfg(test)]
mod tests;
