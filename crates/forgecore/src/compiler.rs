use crate::{EditableNode, ExecutionGraph, ExecutionNode, GraphEdge, NodeMeta};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Keys the editor stores on `data` that are never node inputs. The nested
/// `id` names which descriptor the node instantiates; `label` and
/// `category` are presentation state.
const RESERVED_DATA_KEYS: [&str; 3] = ["label", "category", "id"];

/// Translate an editor graph into its execution-ready form.
///
/// Pure and total: malformed input degrades instead of failing. Dangling
/// edges are ignored, duplicate edges into the same `(target, targetHandle)`
/// resolve last-wins, and no acyclicity or descriptor validation happens
/// here; those checks belong to the runtime.
pub fn compile(nodes: &[EditableNode], edges: &[GraphEdge]) -> ExecutionGraph {
    // (target, targetHandle) -> [source, sourceHandle|0]
    let mut input_map: HashMap<(&str, &str), Value> = HashMap::new();
    for edge in edges {
        let Some(target_handle) = edge.target_handle.as_deref() else {
            continue;
        };
        let source_handle = match &edge.source_handle {
            Some(Value::Null) | None => json!(0),
            Some(handle) => handle.clone(),
        };
        input_map.insert(
            (edge.target.as_str(), target_handle),
            json!([edge.source, source_handle]),
        );
    }

    let mut graph = ExecutionGraph::new();
    for node in nodes {
        let class_type = match node.data.get("id").and_then(Value::as_str) {
            Some(descriptor_id) => descriptor_id.to_string(),
            None => node.node_type.clone(),
        };
        let title = node
            .data
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_string);

        // Static values first, reserved keys stripped.
        let mut inputs = node.data.clone();
        for key in RESERVED_DATA_KEYS {
            inputs.remove(key);
        }

        // Connections always win over same-named static values.
        for ((target, target_handle), reference) in &input_map {
            if *target == node.id {
                inputs.insert((*target_handle).to_string(), reference.clone());
            }
        }

        graph.insert(
            node.id.clone(),
            ExecutionNode {
                class_type,
                meta: NodeMeta { title },
                inputs,
            },
        );
    }

    graph
}
