//! Error types for pagechain
//!
//! Every traversal surfaces failures through `Result<T, Error>`. Errors are
//! grouped by where they originate so callers can tell a failed page fetch
//! from a failed callback or a broken query expression (see [`ErrorKind`]).

use thiserror::Error;

/// The main error type for pagechain
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Page Source Errors
    // ============================================================================
    #[error("Page source failed: {message}")]
    SourceFailure { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Page is not a JSON object: {message}")]
    InvalidPage { message: String },

    // ============================================================================
    // Callback Errors
    // ============================================================================
    #[error("Page callback failed: {message}")]
    CallbackFailure {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    // ============================================================================
    // Query Errors
    // ============================================================================
    #[error("Query '{query}' failed: {message}")]
    EvaluatorFailure { query: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fetching a page failed
    Source,
    /// A user callback failed
    Callback,
    /// The query evaluator failed
    Evaluator,
    /// Configuration could not be read or parsed
    Config,
    /// Anything else
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a page source error
    pub fn source_failure(message: impl Into<String>) -> Self {
        Self::SourceFailure {
            message: message.into(),
        }
    }

    /// Create a callback error
    pub fn callback(message: impl Into<String>) -> Self {
        Self::CallbackFailure {
            message: message.into(),
            source: None,
        }
    }

    /// Attribute an error raised inside a page callback to the callback.
    ///
    /// Callback failures pass through unchanged; anything else is kept as the source.
    pub fn from_callback(err: Error) -> Self {
        match err {
            Self::CallbackFailure { .. } => err,
            other => Self::CallbackFailure {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }

    /// Create an evaluator error for a query
    pub fn evaluator(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EvaluatorFailure {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create an invalid page error
    pub fn invalid_page(message: impl Into<String>) -> Self {
        Self::InvalidPage {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SourceFailure { .. }
            | Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::InvalidUrl(_)
            | Error::InvalidPage { .. } => ErrorKind::Source,
            Error::CallbackFailure { .. } => ErrorKind::Callback,
            Error::EvaluatorFailure { .. } => ErrorKind::Evaluator,
            Error::Config { .. } | Error::YamlParse(_) | Error::JsonParse(_) => ErrorKind::Config,
            Error::Io(_) | Error::Other(_) | Error::Anyhow(_) => ErrorKind::Other,
        }
    }
}

/// Result type alias for pagechain
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
