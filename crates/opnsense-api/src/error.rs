use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `opnsense-api` crate.
///
/// Covers every failure mode: configuration, credential files, caller
/// misuse, and the HTTP transport. Nothing is retried internally -- the
/// variant tells the caller exactly which precondition or request failed.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Invalid base URL or unusable credential source.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Layered config (file + environment) could not be extracted.
    #[error("Config loading failed: {0}")]
    ConfigLoad(Box<figment::Error>),

    // ── Credential file ─────────────────────────────────────────────
    /// The credentials path does not reference an existing regular file.
    #[error("Credentials file not found: {}", path.display())]
    CredentialFileNotFound { path: PathBuf },

    /// The credentials file could not be read or lacks `key`/`secret`.
    #[error("Malformed credentials file {}: {reason}", path.display())]
    MalformedCredentials { path: PathBuf, reason: String },

    // ── Usage ───────────────────────────────────────────────────────
    /// Mutually exclusive or jointly required arguments were violated.
    #[error("Invalid arguments: {message}")]
    Usage { message: String },

    /// A local file needed for a request could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} {reason}: {body}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Shorthand for a [`Error::Config`] with the given message.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::Usage`] with the given message.
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// HTTP status code, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the API key/secret were rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Http { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}
