// ISC DHCPv4 namespace
//
// The core `/api/dhcpv4/...` module: lease listing/removal and service
// control for the ISC DHCP server that predates Kea on OPNsense.

pub mod leases;
pub mod service;

use std::sync::Arc;

use crate::client::OpnClient;

pub use leases::LeasesClient;
pub use service::Dhcpv4ServiceClient;

/// Container for the ISC DHCPv4 resource clients.
#[derive(Debug)]
pub struct Dhcpv4Namespace {
    leases: LeasesClient,
    service: Dhcpv4ServiceClient,
}

impl Dhcpv4Namespace {
    pub(crate) fn new(client: Arc<OpnClient>) -> Self {
        Self {
            leases: LeasesClient::new(Arc::clone(&client)),
            service: Dhcpv4ServiceClient::new(client),
        }
    }

    /// `dhcpv4/leases/*`
    pub fn leases(&self) -> &LeasesClient {
        &self.leases
    }

    /// `dhcpv4/service/*`
    pub fn service(&self) -> &Dhcpv4ServiceClient {
        &self.service
    }
}
