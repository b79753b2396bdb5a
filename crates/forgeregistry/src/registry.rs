use crate::{LocalLoader, RegistryConfig, RemoteNodeService};
use forgecore::{NodeDescriptor, NodeProvider};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// Process-wide catalog of all currently known node descriptors.
///
/// The catalog is an ordered sequence: local descriptors first, remote
/// adapters after, duplicates included. [`NodeRegistry::find`] resolves
/// duplicate ids last-match, so a later-loaded provider shadows earlier
/// ones; the full sequence keeps both entries and logs the conflict.
///
/// Each reload rebuilds from scratch and publishes the result as a single
/// atomic reference swap, so readers never observe a mixture of two reload
/// generations. Reloads themselves are single-flight.
pub struct NodeRegistry {
    loader: LocalLoader,
    remote: Option<RemoteNodeService>,
    catalog: RwLock<Arc<Vec<NodeDescriptor>>>,
    reload_guard: Mutex<()>,
}

impl NodeRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            loader: LocalLoader::new(config.plugins_dir),
            remote: config.remote_url.map(RemoteNodeService::new),
            catalog: RwLock::new(Arc::new(Vec::new())),
            reload_guard: Mutex::new(()),
        }
    }

    /// Register an in-process provider for the local phase.
    pub fn register_provider(&mut self, provider: Arc<dyn NodeProvider>) {
        self.loader.register(provider);
    }

    /// Rebuild the catalog from all providers and publish it.
    ///
    /// Best-effort by design: per-provider faults and a down remote are
    /// logged and absorbed, and the reload still yields a usable (possibly
    /// smaller) catalog.
    pub async fn reload(&self) -> Arc<Vec<NodeDescriptor>> {
        let _flight = self.reload_guard.lock().await;

        let mut catalog = self.loader.load().await;

        if let Some(remote) = &self.remote {
            match remote.fetch_definitions().await {
                Ok(proxies) => {
                    info!("Loaded {} remote nodes", proxies.len());
                    catalog.extend(proxies);
                }
                Err(e) => {
                    warn!("Remote node service unavailable: {}", e);
                }
            }
        }

        let mut seen = HashSet::new();
        for descriptor in &catalog {
            if !seen.insert(descriptor.id.as_str()) {
                warn!(
                    "Duplicate node id '{}'; later provider shadows earlier on lookup",
                    descriptor.id
                );
            }
        }

        info!("Node catalog rebuilt: {} entries", catalog.len());
        let catalog = Arc::new(catalog);
        *self.catalog.write().await = Arc::clone(&catalog);
        catalog
    }

    /// The most recently published catalog; empty before the first reload.
    pub async fn current_catalog(&self) -> Arc<Vec<NodeDescriptor>> {
        Arc::clone(&*self.catalog.read().await)
    }

    /// Look up a descriptor by id. Last-match, so shadowing providers win.
    pub async fn find(&self, id: &str) -> Option<NodeDescriptor> {
        self.current_catalog()
            .await
            .iter()
            .rev()
            .find(|descriptor| descriptor.id == id)
            .cloned()
    }
}
