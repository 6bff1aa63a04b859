// Kea DHCPv4 lease endpoints
//
// No operations are mapped yet; the client exists so the namespace shape
// is stable when lease endpoints are added.

use std::sync::Arc;

use url::Url;

use crate::client::OpnClient;

/// Client for `kea/leases4/*`.
#[derive(Debug)]
pub struct Leases4Client {
    client: Arc<OpnClient>,
}

impl Leases4Client {
    pub(crate) fn new(client: Arc<OpnClient>) -> Self {
        Self { client }
    }

    /// The `/api` base URL this client is bound to.
    pub fn base_url(&self) -> &Url {
        self.client.base_url()
    }
}
