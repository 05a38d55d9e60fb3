//! Common types used throughout the client
//!
//! This module contains the query value model and the wire-string
//! conventions shared by every endpoint.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Date-only wire format used for every date query parameter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Query Values
// ============================================================================

/// A single query parameter value
///
/// Each variant has exactly one wire rendering, see [`QueryValue::to_wire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Sent verbatim
    String(String),
    /// Sent as a decimal integer
    Integer(i64),
    /// Sent as `true` / `false`
    Boolean(bool),
    /// Sent as `YYYY-MM-DD`, never with a time component
    Date(NaiveDate),
}

impl QueryValue {
    /// Render the value the way the API expects it on the wire
    pub fn to_wire(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Date(d) => d.format(DATE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDate> for QueryValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

// ============================================================================
// Dates
// ============================================================================

/// Anything that can be reduced to a calendar date for filtering
///
/// Time of day is discarded; zoned instants use the date in their own zone.
pub trait IntoQueryDate {
    /// Reduce to a calendar date
    fn into_query_date(self) -> NaiveDate;
}

impl IntoQueryDate for NaiveDate {
    fn into_query_date(self) -> NaiveDate {
        self
    }
}

impl IntoQueryDate for NaiveDateTime {
    fn into_query_date(self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> IntoQueryDate for DateTime<Tz> {
    fn into_query_date(self) -> NaiveDate {
        self.date_naive()
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// An enumeration with a canonical wire string per variant
///
/// Implementations use an exhaustive `match` so a new variant cannot be
/// added without choosing its wire string.
pub trait WireEnum: Copy {
    /// The canonical string the API expects for this variant
    fn wire_name(&self) -> &'static str;

    /// Convert into a query value
    fn to_query_value(self) -> QueryValue {
        QueryValue::String(self.wire_name().to_string())
    }
}
