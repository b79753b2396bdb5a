use forgecore::{ForgeError, NodeDescriptor, NodeError, NodeProvider, PortDefinition};
use forgeregistry::{NodeRegistry, RegistryConfig, RemoteNodeService};
use httpmock::prelude::*;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Write a manifest provider directory under the plugins root.
fn write_provider(root: &Path, name: &str, manifest: &serde_json::Value) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("nodes.json"), serde_json::to_vec_pretty(manifest).unwrap()).unwrap();
}

fn registry_for(plugins: &TempDir, remote_url: Option<String>) -> NodeRegistry {
    NodeRegistry::new(RegistryConfig {
        plugins_dir: plugins.path().to_path_buf(),
        remote_url,
    })
}

struct BrokenProvider;

impl NodeProvider for BrokenProvider {
    fn name(&self) -> &str {
        "broken"
    }

    fn nodes(&self) -> forgecore::Result<Vec<NodeDescriptor>> {
        Err(ForgeError::Node(NodeError::ExecutionFailed(
            "missing entry point".to_string(),
        )))
    }
}

struct StaticProvider;

impl NodeProvider for StaticProvider {
    fn name(&self) -> &str {
        "builtin"
    }

    fn nodes(&self) -> forgecore::Result<Vec<NodeDescriptor>> {
        Ok(vec![NodeDescriptor::new("Test.Echo", "Echo")
            .with_category("Test")
            .with_input(PortDefinition::new("text", "string"))])
    }
}

#[tokio::test]
async fn catalog_is_empty_before_first_reload() {
    let plugins = TempDir::new().unwrap();
    let registry = registry_for(&plugins, None);

    assert!(registry.current_catalog().await.is_empty());
}

#[tokio::test]
async fn reload_merges_manifest_providers_and_tags_provenance() {
    let plugins = TempDir::new().unwrap();
    write_provider(
        plugins.path(),
        "math_pack",
        &json!([
            {"id": "Math.Add", "label": "Add", "category": "Math",
             "inputs": [{"name": "a", "type": "number"}, {"name": "b", "type": "number"}],
             "outputs": [{"name": "result", "type": "number"}]},
            {"id": "Math.Multiply", "label": "Multiply", "category": "Math"}
        ]),
    );
    write_provider(
        plugins.path(),
        "agents",
        &json!([{"id": "Agent.Input", "label": "Chat Input", "category": "I/O"}]),
    );

    let registry = registry_for(&plugins, None);
    let catalog = registry.reload().await;

    assert_eq!(catalog.len(), 3);
    let add = registry.find("Math.Add").await.unwrap();
    assert_eq!(add.plugin.as_deref(), Some("math_pack"));
    assert_eq!(add.inputs.len(), 2);
    let input = registry.find("Agent.Input").await.unwrap();
    assert_eq!(input.plugin.as_deref(), Some("agents"));
}

#[tokio::test]
async fn failing_provider_does_not_abort_the_rest() {
    let plugins = TempDir::new().unwrap();
    write_provider(plugins.path(), "good", &json!([{"id": "Good.One", "label": "One"}]));
    let bad_dir = plugins.path().join("bad");
    std::fs::create_dir_all(&bad_dir).unwrap();
    std::fs::write(bad_dir.join("nodes.json"), b"{ not json").unwrap();

    let mut registry = registry_for(&plugins, None);
    registry.register_provider(Arc::new(BrokenProvider));
    registry.register_provider(Arc::new(StaticProvider));

    let catalog = registry.reload().await;

    assert_eq!(catalog.len(), 2);
    assert!(registry.find("Good.One").await.is_some());
    assert!(registry.find("Test.Echo").await.is_some());
}

#[tokio::test]
async fn provider_without_entry_point_is_skipped() {
    let plugins = TempDir::new().unwrap();
    std::fs::create_dir_all(plugins.path().join("empty_dir")).unwrap();
    write_provider(plugins.path(), "good", &json!([{"id": "Good.One", "label": "One"}]));

    let registry = registry_for(&plugins, None);

    assert_eq!(registry.reload().await.len(), 1);
}

#[tokio::test]
async fn unreachable_remote_degrades_to_local_only() {
    let plugins = TempDir::new().unwrap();
    write_provider(plugins.path(), "local", &json!([{"id": "Local.A", "label": "A"}]));

    // Nothing listens on this port.
    let registry = registry_for(&plugins, Some("http://127.0.0.1:9".to_string()));
    let catalog = registry.reload().await;

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].id, "Local.A");
}

#[tokio::test]
async fn remote_error_status_degrades_to_local_only() {
    let plugins = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/definitions");
            then.status(503);
        })
        .await;

    let registry = registry_for(&plugins, Some(server.base_url()));

    assert!(registry.reload().await.is_empty());
}

#[tokio::test]
async fn remote_definitions_become_executable_proxies() {
    let plugins = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/definitions");
            then.status(200).json_body(json!([
                {"id": "PythonAdd", "label": "Add (Python Engine)", "category": "Python/Math",
                 "plugin": "python",
                 "inputs": [{"name": "val_a", "type": "number"}, {"name": "val_b", "type": "number"}],
                 "outputs": [{"name": "output", "type": "any"}]}
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/execute")
                .json_body(json!({"node_id": "PythonAdd", "inputs": {"val_a": 2, "val_b": 3}}));
            then.status(200).json_body(json!({"result": 5}));
        })
        .await;

    let registry = registry_for(&plugins, Some(server.base_url()));
    let catalog = registry.reload().await;

    assert_eq!(catalog.len(), 1);
    let node = &catalog[0];
    assert_eq!(node.plugin.as_deref(), Some("python"));
    assert!(node.is_executable());

    let mut inputs = serde_json::Map::new();
    inputs.insert("val_a".to_string(), json!(2));
    inputs.insert("val_b".to_string(), json!(3));
    let result = node.execute(inputs).await.unwrap();
    assert_eq!(result, json!(5));
}

#[tokio::test]
async fn remote_execute_failure_carries_the_body_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/definitions");
            then.status(200)
                .json_body(json!([{"id": "PythonAdd", "label": "Add"}]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/execute");
            then.status(500).body("boom");
        })
        .await;

    let service = RemoteNodeService::new(server.base_url());
    let descriptors = service.fetch_definitions().await.unwrap();

    let err = descriptors[0]
        .execute(serde_json::Map::new())
        .await
        .unwrap_err();
    match err {
        NodeError::Remote(detail) => assert_eq!(detail, "boom"),
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_remote_entries_are_skipped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/definitions");
            then.status(200).json_body(json!([
                {"label": "no id here"},
                {"id": "Valid.One", "label": "Valid", "inputs": "not an array"},
                {"id": "Valid.Two", "label": "Valid"}
            ]));
        })
        .await;

    let service = RemoteNodeService::new(server.base_url());
    let descriptors = service.fetch_definitions().await.unwrap();

    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].id, "Valid.Two");
}

#[tokio::test]
async fn duplicate_ids_shadow_on_lookup_but_both_stay_in_sequence() {
    let plugins = TempDir::new().unwrap();
    write_provider(
        plugins.path(),
        "a_first",
        &json!([{"id": "Shared.Node", "label": "From A"}]),
    );
    write_provider(
        plugins.path(),
        "b_second",
        &json!([{"id": "Shared.Node", "label": "From B"}]),
    );

    let registry = registry_for(&plugins, None);
    let catalog = registry.reload().await;

    assert_eq!(catalog.len(), 2);
    let resolved = registry.find("Shared.Node").await.unwrap();
    // Directory scan order decides which provider loads later; the lookup
    // must return whichever descriptor sits later in the sequence.
    let last = catalog.iter().rev().find(|d| d.id == "Shared.Node").unwrap();
    assert_eq!(resolved.label, last.label);
}

#[tokio::test]
async fn reload_discards_the_previous_generation() {
    let plugins = TempDir::new().unwrap();
    write_provider(plugins.path(), "pack", &json!([{"id": "Old.Node", "label": "Old"}]));

    let registry = registry_for(&plugins, None);
    registry.reload().await;
    assert!(registry.find("Old.Node").await.is_some());

    std::fs::write(
        plugins.path().join("pack").join("nodes.json"),
        serde_json::to_vec(&json!([{"id": "New.Node", "label": "New"}])).unwrap(),
    )
    .unwrap();

    let catalog = registry.reload().await;
    assert_eq!(catalog.len(), 1);
    assert!(registry.find("Old.Node").await.is_none());
    assert!(registry.find("New.Node").await.is_some());
}

#[tokio::test]
async fn catalog_serializes_without_executors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/definitions");
            then.status(200)
                .json_body(json!([{"id": "PythonAdd", "label": "Add"}]));
        })
        .await;

    let service = RemoteNodeService::new(server.base_url());
    let descriptors = service.fetch_definitions().await.unwrap();
    let serialized = serde_json::to_value(&descriptors).unwrap();

    assert_eq!(serialized[0]["id"], "PythonAdd");
    assert!(serialized[0].get("executor").is_none());
}
