// Kea DHCP namespace
//
// Groups the `/api/kea/...` resource clients: control agent, DHCPv4
// server, leases and service control. Each client shares the facade's
// `OpnClient` snapshot for the current credential epoch.

pub mod ctrl_agent;
pub mod dhcpv4;
pub mod leases4;
pub mod service;

use std::sync::Arc;

use crate::client::OpnClient;

pub use ctrl_agent::CtrlAgentClient;
pub use dhcpv4::KeaDhcpv4Client;
pub use leases4::Leases4Client;
pub use service::KeaServiceClient;

/// Container for the Kea resource clients.
#[derive(Debug)]
pub struct KeaNamespace {
    ctrl_agent: CtrlAgentClient,
    dhcpv4: KeaDhcpv4Client,
    leases4: Leases4Client,
    service: KeaServiceClient,
}

impl KeaNamespace {
    pub(crate) fn new(client: Arc<OpnClient>) -> Self {
        Self {
            ctrl_agent: CtrlAgentClient::new(Arc::clone(&client)),
            dhcpv4: KeaDhcpv4Client::new(Arc::clone(&client)),
            leases4: Leases4Client::new(Arc::clone(&client)),
            service: KeaServiceClient::new(client),
        }
    }

    /// `kea/ctrl_agent/*`
    pub fn ctrl_agent(&self) -> &CtrlAgentClient {
        &self.ctrl_agent
    }

    /// `kea/dhcpv4/*`
    pub fn dhcpv4(&self) -> &KeaDhcpv4Client {
        &self.dhcpv4
    }

    /// `kea/leases4/*`
    pub fn leases4(&self) -> &Leases4Client {
        &self.leases4
    }

    /// `kea/service/*`
    pub fn service(&self) -> &KeaServiceClient {
        &self.service
    }
}
