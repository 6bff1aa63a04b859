// Kea control agent endpoints
//
// Configuration of the Kea Control Agent (`KeaCtrlAgent.xml` model).

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::Payload;
use crate::client::OpnClient;
use crate::error::Error;

/// Client for `kea/ctrl_agent/*`.
#[derive(Debug)]
pub struct CtrlAgentClient {
    client: Arc<OpnClient>,
}

impl CtrlAgentClient {
    pub(crate) fn new(client: Arc<OpnClient>) -> Self {
        Self { client }
    }

    /// Get the control agent configuration.
    ///
    /// `GET /api/kea/ctrl_agent/get`
    pub async fn get(&self) -> Result<Value, Error> {
        debug!("fetching kea control agent config");
        self.client.get_json("kea/ctrl_agent/get").await
    }

    /// Configure the control agent.
    ///
    /// `POST /api/kea/ctrl_agent/set`
    ///
    /// The body follows the `KeaCtrlAgent.xml` model, e.g.
    /// `{"ctrlagent": {"general": {"enabled": "1", "http_host": "127.0.0.1", "http_port": "8000"}}}`.
    /// Changes take effect only after [`KeaServiceClient::reconfigure`](super::KeaServiceClient::reconfigure).
    pub async fn set(&self, data: &Payload) -> Result<Value, Error> {
        debug!("updating kea control agent config");
        self.client.post_json("kea/ctrl_agent/set", data).await
    }
}
