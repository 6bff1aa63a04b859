use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::client::OpnClient;
use crate::error::Error;

/// Client for `kea/service/*`.
#[derive(Debug)]
pub struct KeaServiceClient {
    client: Arc<OpnClient>,
}

impl KeaServiceClient {
    pub(crate) fn new(client: Arc<OpnClient>) -> Self {
        Self { client }
    }

    /// Apply the staged configuration to the running Kea service.
    ///
    /// `POST /api/kea/service/reconfigure`
    pub async fn reconfigure(&self) -> Result<Value, Error> {
        debug!("reconfiguring kea service");
        self.client.post_empty("kea/service/reconfigure").await
    }

    /// `GET /api/kea/service/status`
    pub async fn status(&self) -> Result<Value, Error> {
        self.client.get_json("kea/service/status").await
    }
}
