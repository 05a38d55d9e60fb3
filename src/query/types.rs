//! Query specification types
//!
//! Defines the page size bound, date range parameters and the immutable
//! query specification consumed by the executor.

use crate::error::{Error, Result};
use crate::types::{IntoQueryDate, QueryValue};
use chrono::NaiveDate;
use std::fmt;

/// Wire name of the page size parameter
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Wire name of the continuation token parameter
pub const PAGE_TOKEN_PARAM: &str = "next_page_token";

// ============================================================================
// Page Size
// ============================================================================

/// Number of records requested per page, always within `[MIN, MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(u32);

impl PageSize {
    /// Smallest accepted page size
    pub const MIN: u32 = 1;
    /// Largest accepted page size
    pub const MAX: u32 = 300;
    /// Page size used when the caller does not choose one
    pub const DEFAULT: PageSize = PageSize(30);

    /// Validate and wrap a page size
    pub fn new(size: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(Error::invalid_argument(
                PAGE_SIZE_PARAM,
                format!(
                    "must be between {} and {}, got {size}",
                    Self::MIN,
                    Self::MAX
                ),
            ))
        }
    }

    /// The validated value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for PageSize {
    type Error = Error;

    fn try_from(size: u32) -> Result<Self> {
        Self::new(size)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Date Range
// ============================================================================

/// Optional start/end dates, emitted as `from` / `to` when present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// An unbounded range
    pub fn new() -> Self {
        Self::default()
    }

    /// A range bounded on both sides
    pub fn between(from: impl IntoQueryDate, to: impl IntoQueryDate) -> Self {
        Self::new().since(from).until(to)
    }

    /// Set the start date
    #[must_use]
    pub fn since(mut self, from: impl IntoQueryDate) -> Self {
        self.from = Some(from.into_query_date());
        self
    }

    /// Set the end date
    #[must_use]
    pub fn until(mut self, to: impl IntoQueryDate) -> Self {
        self.to = Some(to.into_query_date());
        self
    }

    /// Start date, if any
    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    /// End date, if any
    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }
}

// ============================================================================
// Query Spec
// ============================================================================

/// Immutable description of one page request
///
/// Built through [`QuerySpec::builder`]; every instance has a valid page
/// size and a non-empty path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    path: String,
    params: Vec<(String, Option<QueryValue>)>,
    page_size: PageSize,
    page_token: Option<String>,
}

impl QuerySpec {
    /// Start building a query against `path`
    pub fn builder(path: impl Into<String>) -> QuerySpecBuilder {
        QuerySpecBuilder::new(path)
    }

    /// Request path, relative to the transport's base URL
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Declared parameters in insertion order, including absent ones
    pub fn params(&self) -> &[(String, Option<QueryValue>)] {
        &self.params
    }

    /// Requested page size
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Continuation token from a previous page
    pub fn page_token(&self) -> Option<&str> {
        self.page_token.as_deref()
    }

    /// Wire query pairs: present parameters, then page size, then token
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .params
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.clone(), v.to_wire())))
            .collect();

        pairs.push((PAGE_SIZE_PARAM.to_string(), self.page_size.to_string()));

        if let Some(token) = &self.page_token {
            pairs.push((PAGE_TOKEN_PARAM.to_string(), token.clone()));
        }

        pairs
    }
}

/// Builder for [`QuerySpec`]
#[derive(Debug, Clone)]
pub struct QuerySpecBuilder {
    path: String,
    params: Vec<(String, Option<QueryValue>)>,
    page_size: PageSize,
    page_token: Option<String>,
}

impl QuerySpecBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
            page_size: PageSize::DEFAULT,
            page_token: None,
        }
    }

    /// Declare an optional parameter; `None` is never sent
    ///
    /// Declaring the same name twice replaces the earlier value in place.
    #[must_use]
    pub fn param<V: Into<QueryValue>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        let name = name.into();
        let value = value.map(Into::into);
        match self.params.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    /// Declare a parameter that is always sent
    #[must_use]
    pub fn value(self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.param(name, Some(value))
    }

    /// Declare `from` / `to` from a date range
    #[must_use]
    pub fn date_range(self, range: &DateRange) -> Self {
        self.param("from", range.from()).param("to", range.to())
    }

    /// Set a validated page size
    #[must_use]
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Validate and set a raw page size
    pub fn try_page_size(self, size: u32) -> Result<Self> {
        Ok(self.page_size(PageSize::new(size)?))
    }

    /// Set the continuation token; an empty token counts as absent
    #[must_use]
    pub fn page_token(mut self, token: Option<impl Into<String>>) -> Self {
        self.page_token = token.map(Into::into).filter(|t| !t.is_empty());
        self
    }

    /// Validate and freeze the query
    pub fn build(self) -> Result<QuerySpec> {
        if self.path.trim().is_empty() {
            return Err(Error::invalid_argument("path", "must not be empty"));
        }

        if let Some((name, _)) = self
            .params
            .iter()
            .find(|(name, _)| name == PAGE_SIZE_PARAM || name == PAGE_TOKEN_PARAM)
        {
            return Err(Error::invalid_argument(
                name.clone(),
                "is reserved for pagination",
            ));
        }

        Ok(QuerySpec {
            path: self.path,
            params: self.params,
            page_size: self.page_size,
            page_token: self.page_token,
        })
    }
}
