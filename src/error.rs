//! Error types for the call-log client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Errors fall into three groups callers care about:
//! - argument errors, detected before any I/O
//! - request failures, surfaced from the transport unchanged
//! - cancellation, which is intentional and never retried
//!
//! Request failures span three variants: [`Error::RequestFailed`] for a
//! non-2xx response, [`Error::Timeout`] and [`Error::Http`] for connection
//! level failures. Match on [`Error::is_request_failure`] to treat them as
//! one group.

use thiserror::Error;

/// The main error type for the call-log client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Argument Errors
    // ============================================================================
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. Timeouts and connection
    /// errors are reported as [`Error::Timeout`] and [`Error::Http`]; use
    /// [`Error::is_request_failure`] to catch all three.
    #[error("HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to extract records from field '{field}': {message}")]
    RecordExtraction { field: String, message: String },

    // ============================================================================
    // Cancellation
    // ============================================================================
    #[error("Request cancelled")]
    Cancelled,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Writing output failed, including a closed stdout pipe
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a request failure from an HTTP status and body
    pub fn request_failed(status: u16, body: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a record extraction error
    pub fn record_extraction(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordExtraction {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the reader of our output went away
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }

    /// True for intentional abandonment of a request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// True when the transport or the server failed the request
    ///
    /// Covers [`Error::RequestFailed`], [`Error::Timeout`] and [`Error::Http`].
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::RequestFailed { .. } | Self::Timeout { .. }
        )
    }

    /// Check if this error is worth retrying by a caller-side retry policy
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::Timeout { .. } => true,
            Error::RequestFailed { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the call-log client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
