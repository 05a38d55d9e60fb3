//! Pagination types and envelope decoding

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Default field carrying the continuation token
pub const DEFAULT_NEXT_TOKEN_FIELD: &str = "next_page_token";

/// Default field carrying the total record count
pub const DEFAULT_TOTAL_FIELD: &str = "total_records";

// ============================================================================
// Page
// ============================================================================

/// One decoded page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Records on this page, in response order
    pub items: Vec<T>,
    /// Token for the next page; `None` when this is the last page
    pub next_page_token: Option<String>,
    /// Total record count, when the API reports one
    pub total_records: Option<u64>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, next_page_token: Option<String>, total_records: Option<u64>) -> Self {
        Self {
            items,
            next_page_token,
            total_records,
        }
    }

    /// Whether another page can be requested
    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the records, dropping pagination metadata
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Transform the records, keeping pagination metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_page_token: self.next_page_token,
            total_records: self.total_records,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ============================================================================
// Envelope Format
// ============================================================================

/// Where an endpoint family puts records and pagination metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeFormat {
    /// Field holding the records array
    pub items_field: String,
    /// Field holding the continuation token
    pub next_token_field: String,
    /// Field holding the total record count
    pub total_field: String,
}

impl EnvelopeFormat {
    /// Envelope with records under `items_field` and default metadata fields
    pub fn new(items_field: impl Into<String>) -> Self {
        Self {
            items_field: items_field.into(),
            next_token_field: DEFAULT_NEXT_TOKEN_FIELD.to_string(),
            total_field: DEFAULT_TOTAL_FIELD.to_string(),
        }
    }

    /// Override the continuation token field
    #[must_use]
    pub fn next_token_field(mut self, field: impl Into<String>) -> Self {
        self.next_token_field = field.into();
        self
    }

    /// Override the total count field
    #[must_use]
    pub fn total_field(mut self, field: impl Into<String>) -> Self {
        self.total_field = field.into();
        self
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode one response body into a typed page
///
/// A missing or `null` records field is an empty page. An empty
/// continuation token means there are no further pages.
pub fn decode_page<T: DeserializeOwned>(body: &str, format: &EnvelopeFormat) -> Result<Page<T>> {
    let value: Value = serde_json::from_str(body).map_err(|e| Error::Decode {
        message: format!("Failed to parse JSON: {e}"),
    })?;

    let Value::Object(mut envelope) = value else {
        return Err(Error::decode("response body is not a JSON object"));
    };

    let items = match envelope.remove(&format.items_field) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(records)) => records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value(record).map_err(|e| {
                    Error::record_extraction(&format.items_field, format!("record {index}: {e}"))
                })
            })
            .collect::<Result<Vec<T>>>()?,
        Some(other) => {
            return Err(Error::record_extraction(
                &format.items_field,
                format!("expected an array, found {}", json_kind(&other)),
            ))
        }
    };

    let next_page_token = match envelope.get(&format.next_token_field) {
        None | Some(Value::Null) => None,
        Some(Value::String(token)) if token.is_empty() => None,
        Some(Value::String(token)) => Some(token.clone()),
        Some(other) => {
            return Err(Error::decode(format!(
                "'{}' must be a string, found {}",
                format.next_token_field,
                json_kind(other)
            )))
        }
    };

    let total_records = match envelope.get(&format.total_field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_u64().ok_or_else(|| {
            Error::decode(format!(
                "'{}' must be a non-negative integer, found {value}",
                format.total_field
            ))
        })?),
    };

    debug!(
        items = items.len(),
        has_more = next_page_token.is_some(),
        "Decoded page from '{}'",
        format.items_field
    );

    Ok(Page {
        items,
        next_page_token,
        total_records,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
