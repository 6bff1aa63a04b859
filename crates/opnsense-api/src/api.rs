// Top-level facade: owns configuration and hands out namespace wrappers.
//
// Credentials and base URL are resolved once in `OpnsenseApi::new`.
// Namespace wrappers are built lazily on first access and memoized until
// the next `set_credentials`, which starts a new credential epoch.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::{debug, error, info};
use url::Url;

use crate::client::OpnClient;
use crate::config::ApiConfig;
use crate::credentials::Credentials;
use crate::dhcpv4::Dhcpv4Namespace;
use crate::error::Error;
use crate::kea::KeaNamespace;
use crate::transport::{TlsMode, TransportConfig};

/// Memoized namespace wrappers for one credential epoch.
///
/// One slot per namespace. The whole cache is replaced on credential
/// update rather than tracking staleness per slot.
#[derive(Debug, Default)]
struct NamespaceCache {
    dhcpv4: OnceLock<Arc<Dhcpv4Namespace>>,
    kea: OnceLock<Arc<KeaNamespace>>,
}

/// Entry point to the OPNsense API.
///
/// ```no_run
/// # async fn run() -> Result<(), opnsense_api::Error> {
/// use opnsense_api::{ApiConfig, OpnsenseApi};
///
/// let api = OpnsenseApi::new(
///     ApiConfig::new("https://192.168.1.1").with_api_key_file("/root/apikey.txt"),
/// )?;
/// let status = api.kea().service().status().await?;
/// println!("{status}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OpnsenseApi {
    base_url: Url,
    transport: TransportConfig,
    http: reqwest::Client,
    client: Arc<OpnClient>,
    namespaces: NamespaceCache,
}

impl OpnsenseApi {
    /// Resolve credentials, validate the base URL and build the HTTP client.
    ///
    /// Credentials come from `api_key_file` when set and non-empty (even if a key/secret
    /// pair is also given), otherwise from `api_key` + `api_secret`.
    pub fn new(config: ApiConfig) -> Result<Self, Error> {
        if config.timeout == 0 {
            return Err(Error::config("timeout must be at least 1 second"));
        }
        let credentials = resolve_credentials(&config)?;
        let base_url = normalize_base_url(&config.base_url)?;

        let transport = TransportConfig {
            tls: TlsMode::from_options(config.verify_cert, config.ca_cert.clone()),
            timeout: config.timeout(),
        };
        let http = transport.build_client()?;
        let client = Arc::new(OpnClient::new(
            http.clone(),
            base_url.clone(),
            credentials,
            transport.timeout.as_secs(),
        ));

        debug!(%base_url, verify_cert = transport.tls.verifies(), "OPNsense API configured");
        Ok(Self {
            base_url,
            transport,
            http,
            client,
            namespaces: NamespaceCache::default(),
        })
    }

    /// Replace the API key/secret and drop every cached namespace wrapper.
    ///
    /// Wrappers obtained before the call keep the old credentials; the
    /// next accessor call builds fresh ones.
    pub fn set_credentials(
        &mut self,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<(), Error> {
        let credentials = Credentials::new(key, secret)?;
        self.client = Arc::new(OpnClient::new(
            self.http.clone(),
            self.base_url.clone(),
            credentials,
            self.transport.timeout.as_secs(),
        ));
        self.namespaces = NamespaceCache::default();
        info!("API credentials updated, namespace cache cleared");
        Ok(())
    }

    // ── Namespaces ───────────────────────────────────────────────────

    /// The ISC DHCPv4 namespace (`/api/dhcpv4/...`).
    pub fn dhcpv4(&self) -> Arc<Dhcpv4Namespace> {
        Arc::clone(self.namespaces.dhcpv4.get_or_init(|| {
            debug!("building dhcpv4 namespace");
            Arc::new(Dhcpv4Namespace::new(Arc::clone(&self.client)))
        }))
    }

    /// The Kea DHCP namespace (`/api/kea/...`).
    pub fn kea(&self) -> Arc<KeaNamespace> {
        Arc::clone(self.namespaces.kea.get_or_init(|| {
            debug!("building kea namespace");
            Arc::new(KeaNamespace::new(Arc::clone(&self.client)))
        }))
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The normalized base URL, always ending in `/api`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The API key of the current credential epoch.
    pub fn api_key(&self) -> &str {
        self.client.credentials().key()
    }

    pub fn verify_cert(&self) -> bool {
        self.transport.tls.verifies()
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout
    }
}

/// Pick the single credential source allowed by the config.
fn resolve_credentials(config: &ApiConfig) -> Result<Credentials, Error> {
    if let Some(path) = config
        .api_key_file
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
    {
        info!("initializing OPNsense API with API key file");
        return Credentials::from_file(path);
    }

    let key = config.api_key.as_deref().filter(|k| !k.is_empty());
    let secret = config
        .api_secret
        .as_ref()
        .map(|s| s.expose_secret())
        .filter(|s| !s.is_empty());

    if let (Some(key), Some(secret)) = (key, secret) {
        info!("initializing OPNsense API with API key and secret");
        Credentials::new(key, secret)
    } else {
        error!("neither an API key file nor both API key and secret were provided");
        Err(Error::config(
            "provide either an API key file or both an API key and an API secret",
        ))
    }
}

/// Validate an absolute HTTP(S) URL and normalize it to `scheme://host[:port]/api`.
///
/// A URL whose path already ends in `/api` keeps its path (minus any
/// trailing slash); any other path is replaced by `/api`.
pub fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let invalid = || Error::config(format!("OPNsense base URL is not valid: {raw}"));

    let mut url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }

    let path = url.path().trim_end_matches('/').to_owned();
    if path.ends_with("/api") {
        url.set_path(&path);
    } else {
        url.set_path("/api");
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
