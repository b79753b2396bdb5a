use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node as authored in the visual editor. Unvalidated: `data` holds the
/// static field values the user typed, plus UI-only keys (`label`,
/// `category`, and a nested `id` naming which descriptor it instantiates).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditableNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Directed data dependency from one node's named output to another node's
/// named input, as the editor draws it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub source: String,
    /// Output handle on the source node; index 0 when the editor omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<serde_json::Value>,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

/// Execution-ready form of one node: resolved inputs plus the descriptor id
/// to instantiate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionNode {
    pub class_type: String,
    #[serde(rename = "_meta")]
    pub meta: NodeMeta,
    /// Input name to either a literal value or a
    /// `[sourceNodeId, sourceHandle]` deferred reference.
    pub inputs: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Compiler output: node id to its execution-ready form. No ordering is
/// computed here; scheduling belongs to the runtime.
pub type ExecutionGraph = HashMap<String, ExecutionNode>;
