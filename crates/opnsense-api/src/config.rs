// ── Facade configuration ──
//
// `ApiConfig` is the full option set accepted by `OpnsenseApi::new`.
// It can be built in code with the `with_*` setters, or layered from a
// TOML file and `OPNSENSE_*` environment variables through figment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::transport::DEFAULT_TIMEOUT_SECS;

/// Environment variable prefix recognized by [`ApiConfig::figment`].
pub const ENV_PREFIX: &str = "OPNSENSE_";

/// Options for constructing an [`OpnsenseApi`](crate::OpnsenseApi).
///
/// Credentials come from exactly one source: `api_key_file` if set,
/// otherwise the `api_key` + `api_secret` pair.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Firewall URL, e.g. `https://192.168.1.1`. Normalized to end in `/api`.
    #[serde(default)]
    pub base_url: String,

    /// Path to an OPNsense API key file (`key=...` / `secret=...`).
    #[serde(default)]
    pub api_key_file: Option<PathBuf>,

    /// API key, used only when `api_key_file` is unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API secret, used only when `api_key_file` is unset.
    #[serde(default, skip_serializing)]
    pub api_secret: Option<SecretString>,

    /// Verify the firewall's TLS certificate. Off by default because
    /// OPNsense ships with a self-signed certificate.
    #[serde(default)]
    pub verify_cert: bool,

    /// PEM CA bundle to trust when `verify_cert` is on.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key_file: None,
            api_key: None,
            api_secret: None,
            verify_cert: false,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Start a config for the given firewall URL with default options.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read credentials from an API key file.
    pub fn with_api_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.api_key_file = Some(path.into());
        self
    }

    /// Use an explicit key/secret pair.
    pub fn with_api_key(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self.api_secret = Some(SecretString::from(secret.into()));
        self
    }

    pub fn with_verify_cert(mut self, verify: bool) -> Self {
        self.verify_cert = verify;
        self
    }

    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(path.into());
        self
    }

    /// Per-request timeout, rounded up to whole seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self
    }

    /// The configured timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Layer defaults, then the TOML file at `path` (if it exists), then
    /// `OPNSENSE_*` environment variables.
    ///
    /// Callers can merge further providers (e.g. command-line overrides)
    /// before extracting.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the config from `path` plus the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::figment(path).extract()?)
    }
}
