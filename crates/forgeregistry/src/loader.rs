use forgecore::{NodeDescriptor, NodeProvider};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Entry point file a manifest provider must expose in its directory.
const MANIFEST_FILE: &str = "nodes.json";

/// Discovers and imports local node providers.
///
/// Two kinds of provider feed the local phase: in-process providers
/// registered up front, and manifest providers discovered under the
/// configured plugins root (one logical provider per subdirectory, entry
/// point `nodes.json`). Every descriptor is tagged with its provider's
/// name for diagnostics. A failing provider is logged and skipped; it
/// never aborts the remaining providers.
pub struct LocalLoader {
    plugins_dir: PathBuf,
    providers: Vec<Arc<dyn NodeProvider>>,
}

impl LocalLoader {
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            providers: Vec::new(),
        }
    }

    /// Register an in-process provider.
    pub fn register(&mut self, provider: Arc<dyn NodeProvider>) {
        info!("Registering node provider: {}", provider.name());
        self.providers.push(provider);
    }

    /// Import every provider's descriptor list, best-effort.
    pub async fn load(&self) -> Vec<NodeDescriptor> {
        let mut descriptors = Vec::new();

        for provider in &self.providers {
            match provider.nodes() {
                Ok(nodes) => {
                    debug!("Provider '{}' exported {} nodes", provider.name(), nodes.len());
                    descriptors.extend(tag(nodes, provider.name()));
                }
                Err(e) => {
                    error!("Error loading provider '{}': {}", provider.name(), e);
                }
            }
        }

        descriptors.extend(self.load_manifests().await);
        descriptors
    }

    async fn load_manifests(&self) -> Vec<NodeDescriptor> {
        let mut descriptors = Vec::new();
        if !self.plugins_dir.is_dir() {
            return descriptors;
        }

        let mut entries = match tokio::fs::read_dir(&self.plugins_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Cannot scan plugins dir {:?}: {}", self.plugins_dir, e);
                return descriptors;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let provider = entry.file_name().to_string_lossy().into_owned();
            match load_manifest(&path).await {
                Ok(Some(nodes)) => {
                    debug!("Provider '{}' exported {} nodes", provider, nodes.len());
                    descriptors.extend(tag(nodes, &provider));
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Error loading provider '{}': {}", provider, e);
                }
            }
        }

        descriptors
    }
}

/// Read one provider directory's manifest. Ok(None) means no entry point,
/// which is not a fault.
async fn load_manifest(dir: &Path) -> forgecore::Result<Option<Vec<NodeDescriptor>>> {
    let entry_point = dir.join(MANIFEST_FILE);
    if !entry_point.is_file() {
        return Ok(None);
    }
    let raw = tokio::fs::read(&entry_point).await?;
    let nodes: Vec<NodeDescriptor> = serde_json::from_slice(&raw)?;
    Ok(Some(nodes))
}

fn tag(nodes: Vec<NodeDescriptor>, provider: &str) -> Vec<NodeDescriptor> {
    nodes
        .into_iter()
        .map(|mut node| {
            node.plugin = Some(provider.to_string());
            node
        })
        .collect()
}
