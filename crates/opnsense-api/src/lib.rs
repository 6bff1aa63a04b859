// opnsense-api: Async Rust client for the OPNsense Kea DHCP and DHCPv4 REST API

pub mod api;
pub mod client;
pub mod config;
pub mod credentials;
pub mod dhcpv4;
pub mod error;
pub mod kea;
pub mod transport;

pub use api::{OpnsenseApi, normalize_base_url};
pub use client::OpnClient;
pub use config::ApiConfig;
pub use credentials::Credentials;
pub use dhcpv4::Dhcpv4Namespace;
pub use error::Error;
pub use kea::KeaNamespace;
pub use transport::{DEFAULT_TIMEOUT_SECS, TlsMode, TransportConfig};

/// Request body for configuration endpoints.
///
/// Open, insertion-ordered JSON object. Its shape is owned by the
/// firewall's data model and is not validated client-side.
pub type Payload = serde_json::Map<String, serde_json::Value>;
