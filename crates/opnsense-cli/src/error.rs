//! CLI error types with miette diagnostics.
//!
//! Maps `opnsense_api::Error` variants into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use opnsense_api::Error as ApiError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the firewall")]
    #[diagnostic(
        code(opnsense::connection_failed),
        help("Check that the firewall is reachable and --base-url points at its web UI.")
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(opnsense::tls_error),
        help("Check the --ca-cert file, or drop --verify-cert for a self-signed firewall.")
    )]
    Tls { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(opnsense::auth_failed),
        help(
            "Verify the API key and secret, and that the key's user may access this endpoint.\n\
             Keys are managed under System > Access > Users in the web UI."
        )
    )]
    AuthFailed { status: u16 },

    #[error("No API credentials configured")]
    #[diagnostic(
        code(opnsense::no_credentials),
        help(
            "Pass --api-key-file, or --api-key together with --api-secret.\n\
             Or set OPNSENSE_API_KEY_FILE / OPNSENSE_API_KEY + OPNSENSE_API_SECRET,\n\
             or add them to {path}."
        )
    )]
    NoCredentials { path: String },

    #[error("No firewall URL configured")]
    #[diagnostic(
        code(opnsense::no_base_url),
        help("Pass --base-url, set OPNSENSE_BASE_URL, or add base_url to {path}.")
    )]
    NoBaseUrl { path: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Not found: {body}")]
    #[diagnostic(
        code(opnsense::not_found),
        help("Check the UUID or IP address; list commands show what exists.")
    )]
    NotFound { body: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(opnsense::validation))]
    Validation { field: String, reason: String },

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(opnsense::timeout),
        help("Increase the timeout with --timeout or check the firewall's load.")
    )]
    Timeout { seconds: u64 },

    // ── Library / IO ─────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(opnsense::api))]
    Api(ApiError),

    #[error("Could not read {path}")]
    #[diagnostic(code(opnsense::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not render output: {0}")]
    #[diagnostic(code(opnsense::output))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoBaseUrl { .. } => exit_code::USAGE,
            Self::Api(ApiError::Usage { .. } | ApiError::Config { .. }) => exit_code::USAGE,
            Self::Api(_) | Self::Io { .. } | Self::Render(_) => exit_code::GENERAL,
        }
    }
}

// ── opnsense_api::Error → CliError mapping ───────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        if err.is_auth_failure() {
            return Self::AuthFailed {
                status: err.status().unwrap_or_default(),
            };
        }

        if matches!(&err, ApiError::Transport(source) if source.is_connect()) {
            return Self::ConnectionFailed { source: err };
        }

        match err {
            ApiError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            ApiError::Tls(message) => Self::Tls { message },
            ApiError::Http { status: 404, body, .. } => Self::NotFound { body },
            other => Self::Api(other),
        }
    }
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Api(ApiError::from(err))
    }
}
