//! Error types and handling for tfdocs-core operations.
//!
//! The discovery pipeline contains every failure at the granularity of a
//! single provider: a resolver or enumerator error is recorded against the
//! provider identifier that caused it (see [`ProviderFailure`]) and the rest of
//! the batch carries on.
//!
//! ## Error Categories
//!
//! - **Input errors**: provider identifiers that are not `owner/name`
//! - **Remote errors**: missing repositories, non-success responses, missing tags,
//!   failed directory listings
//! - **Local errors**: storage, configuration and (de)serialization problems
//!
//! ```rust
//! use tfdocs_core::{Error, ProviderRef};
//!
//! match ProviderRef::parse("hashicorp") {
//!     Err(Error::MalformedInput(input)) => assert_eq!(input, "hashicorp"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// The main error type for tfdocs-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A provider identifier could not be split into `owner/name`.
    #[error("Malformed provider identifier '{0}': expected 'owner/name'")]
    MalformedInput(String),

    /// The provider repository does not exist.
    ///
    /// Reported to the user and never retried.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A remote request returned a non-success status other than 404.
    #[error("Request to {url} failed with status {status}")]
    FetchFailed {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The provider has no usable tag to pin documentation to.
    #[error("No published version for {provider}: {reason}")]
    VersionUnavailable {
        /// `owner/name` of the provider.
        provider: String,
        /// Why the tag list could not be used.
        reason: String,
    },

    /// Listing the documentation entities of a resolved provider failed.
    #[error("Failed to enumerate documentation for {provider}: {reason}")]
    Enumeration {
        /// `owner/name` of the provider.
        provider: String,
        /// Underlying failure.
        reason: String,
    },

    /// Transport-level failure (connection refused, timeout, TLS, decoding).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Local storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// Useful for structured logging and JSON output:
    ///
    /// - `"malformed_input"`, `"not_found"`, `"fetch_failed"`,
    ///   `"version_unavailable"`, `"enumeration"` - pipeline failures
    /// - `"network"`, `"io"`, `"storage"`, `"config"`, `"serialization"` - ambient failures
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "malformed_input",
            Self::NotFound(_) => "not_found",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::VersionUnavailable { .. } => "version_unavailable",
            Self::Enumeration { .. } => "enumeration",
            Self::Network(_) => "network",
            Self::Io(_) => "io",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// A pipeline failure attributed to one provider identifier.
#[derive(Debug)]
pub struct ProviderFailure {
    /// The identifier exactly as it appeared in the input set.
    pub identifier: String,
    /// What went wrong.
    pub error: Error,
}

impl ProviderFailure {
    /// Attribute `error` to `identifier`.
    pub fn new(identifier: impl Into<String>, error: Error) -> Self {
        Self {
            identifier: identifier.into(),
            error,
        }
    }
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.identifier, self.error)
    }
}
