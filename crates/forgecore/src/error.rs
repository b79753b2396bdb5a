use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Faults raised while invoking a node's execute capability.
///
/// These propagate to whoever invoked the node; catalog-construction faults
/// use [`RegistryError`] instead and never escape the loader.
#[derive(Error, Debug, Clone)]
pub enum NodeError {
    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Invalid input type for '{field}': expected {expected}")]
    InvalidInputType { field: String, expected: String },

    #[error("Node '{0}' is not executable")]
    NotExecutable(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Non-success response from the remote execution endpoint. Carries the
    /// remote's error body verbatim.
    #[error("Remote execution failed: {0}")]
    Remote(String),
}

/// Faults contained within catalog construction. Logged and skipped, never
/// allowed to abort a reload.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Provider '{provider}' failed to load: {reason}")]
    ProviderLoad { provider: String, reason: String },

    #[error("Remote definitions unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
