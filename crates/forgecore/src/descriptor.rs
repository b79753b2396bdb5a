use crate::NodeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Mapping of port name to JSON value, as carried across execute calls.
pub type ValueMap = serde_json::Map<String, serde_json::Value>;

/// Execute capability attached to a descriptor.
///
/// Two implementations exist behind this trait: native in-process executors
/// and remote proxy executors that forward the call over the network.
/// Callers never distinguish the two.
#[async_trait]
pub trait NodeExecutor: Send + Sync {
    /// Run the node against the given named inputs.
    ///
    /// Native executors return an object value keyed by output name; a
    /// remote proxy returns whatever the remote's `result` field holds.
    async fn execute(&self, inputs: ValueMap) -> Result<serde_json::Value, NodeError>;
}

/// A local provider of node descriptors.
///
/// One logical provider contributes a batch of descriptors; a failure here
/// models an import-time error and is isolated by the loader.
pub trait NodeProvider: Send + Sync {
    /// Provider identity, used as the provenance tag on its descriptors.
    fn name(&self) -> &str;

    /// The provider's exported descriptor list.
    fn nodes(&self) -> crate::Result<Vec<NodeDescriptor>>;
}

/// Named, typed port on a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub port_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PortDefinition {
    pub fn new(name: impl Into<String>, port_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port_type: port_type.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Catalog entry describing an invocable unit: identity, typed ports, and
/// an optional execute capability.
#[derive(Clone, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Globally unique, stable across reloads (e.g. "Math.Add").
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub inputs: Vec<PortDefinition>,
    #[serde(default)]
    pub outputs: Vec<PortDefinition>,
    /// Which provider produced this descriptor. Diagnostics only, never
    /// used for dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    /// Absent for display-only descriptors. Not serializable; the HTTP
    /// boundary ships descriptors without it.
    #[serde(skip)]
    pub executor: Option<Arc<dyn NodeExecutor>>,
}

impl NodeDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category: String::new(),
            description: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            plugin: None,
            executor: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_input(mut self, port: PortDefinition) -> Self {
        self.inputs.push(port);
        self
    }

    pub fn with_output(mut self, port: PortDefinition) -> Self {
        self.outputs.push(port);
        self
    }

    pub fn with_executor(mut self, executor: Arc<dyn NodeExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Whether this descriptor can be invoked at all.
    pub fn is_executable(&self) -> bool {
        self.executor.is_some()
    }

    /// Invoke the execute capability, failing for display-only descriptors.
    pub async fn execute(&self, inputs: ValueMap) -> Result<serde_json::Value, NodeError> {
        match &self.executor {
            Some(executor) => executor.execute(inputs).await,
            None => Err(NodeError::NotExecutable(self.id.clone())),
        }
    }
}

impl fmt::Debug for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("category", &self.category)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("plugin", &self.plugin)
            .field("executable", &self.is_executable())
            .finish()
    }
}
