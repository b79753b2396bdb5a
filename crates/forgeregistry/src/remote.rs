use async_trait::async_trait;
use forgecore::{NodeDescriptor, NodeError, NodeExecutor, RegistryError, ValueMap};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for the remote node-provider service.
///
/// The service is data-only: `GET /definitions` lists descriptor-shaped
/// objects without an execute capability, and `POST /execute` runs one node
/// by id. Fetched descriptors are treated as an untrusted external schema;
/// malformed entries are skipped at ingestion.
pub struct RemoteNodeService {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    node_id: &'a str,
    inputs: ValueMap,
}

impl RemoteNodeService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the remote descriptor list and wrap each entry in a proxy
    /// executor that forwards invocations back to the service.
    pub async fn fetch_definitions(&self) -> Result<Vec<NodeDescriptor>, RegistryError> {
        let url = format!("{}/definitions", self.base_url);
        debug!("Fetching remote definitions from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RegistryError::RemoteUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::RemoteUnavailable(format!(
                "definitions fetch returned {}",
                response.status()
            )));
        }

        let entries: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| RegistryError::RemoteUnavailable(e.to_string()))?;

        let mut descriptors = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<NodeDescriptor>(entry) {
                Ok(mut descriptor) => {
                    if descriptor.plugin.is_none() {
                        descriptor.plugin = Some("remote".to_string());
                    }
                    descriptor.executor = Some(Arc::new(RemoteProxyExecutor {
                        client: self.client.clone(),
                        base_url: self.base_url.clone(),
                        node_id: descriptor.id.clone(),
                    }));
                    descriptors.push(descriptor);
                }
                Err(e) => {
                    warn!("Skipping malformed remote definition: {}", e);
                }
            }
        }

        Ok(descriptors)
    }
}

/// Execute capability that forwards the call to the remote service.
///
/// One outbound call per invocation, no timeout or retry imposed here; a
/// caller wanting bounded latency wraps the invocation in its own timeout.
pub struct RemoteProxyExecutor {
    client: reqwest::Client,
    base_url: String,
    node_id: String,
}

#[async_trait]
impl NodeExecutor for RemoteProxyExecutor {
    async fn execute(&self, inputs: ValueMap) -> Result<serde_json::Value, NodeError> {
        debug!("Forwarding execution of '{}' to remote", self.node_id);

        let response = self
            .client
            .post(format!("{}/execute", self.base_url))
            .json(&ExecuteRequest {
                node_id: &self.node_id,
                inputs,
            })
            .send()
            .await
            .map_err(|e| NodeError::ExecutionFailed(format!("Remote call failed: {}", e)))?;

        if !response.status().is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NodeError::Remote(detail));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| NodeError::ExecutionFailed(format!("Invalid remote response: {}", e)))?;

        Ok(body.get("result").cloned().unwrap_or(serde_json::Value::Null))
    }
}
