use std::path::PathBuf;

/// Configuration for the registry's two load phases.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Root directory scanned for manifest providers, one per subdirectory.
    pub plugins_dir: PathBuf,
    /// Base URL of the remote node service. None disables the remote phase.
    pub remote_url: Option<String>,
}

impl RegistryConfig {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// `FORGE_PLUGINS_DIR` sets the provider root; `REMOTE_NODES_URL` sets
    /// the remote service base URL.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            plugins_dir: std::env::var("FORGE_PLUGINS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.plugins_dir),
            remote_url: std::env::var("REMOTE_NODES_URL").ok().or(defaults.remote_url),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            plugins_dir: PathBuf::from("plugins"),
            remote_url: None,
        }
    }
}
