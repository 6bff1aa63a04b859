// Shared transport configuration for building the reqwest::Client.
//
// One client is built per facade and shared by every namespace wrapper,
// so TLS policy and timeout are applied uniformly to every request.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TLS verification mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the built-in root certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (OPNsense ships a self-signed one).
    DangerAcceptInvalid,
}

impl TlsMode {
    /// Map the facade's `verify_cert` flag and optional CA bundle to a mode.
    pub fn from_options(verify_cert: bool, ca_cert: Option<PathBuf>) -> Self {
        match (verify_cert, ca_cert) {
            (false, _) => Self::DangerAcceptInvalid,
            (true, Some(path)) => Self::CustomCa(path),
            (true, None) => Self::System,
        }
    }

    /// Whether server certificates are checked at all.
    pub fn verifies(&self) -> bool {
        !matches!(self, Self::DangerAcceptInvalid)
    }
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("opnsense-api/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
