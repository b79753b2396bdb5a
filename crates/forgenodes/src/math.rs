use async_trait::async_trait;
use forgecore::{NodeDescriptor, NodeError, NodeExecutor, NodeProvider, PortDefinition, ValueMap};
use serde_json::json;
use std::sync::Arc;

/// Math operation nodes.
pub struct MathProvider;

impl NodeProvider for MathProvider {
    fn name(&self) -> &str {
        "math"
    }

    fn nodes(&self) -> forgecore::Result<Vec<NodeDescriptor>> {
        Ok(vec![
            NodeDescriptor::new("Math.Add", "Add Numbers")
                .with_category("Math")
                .with_description("Adds two numbers together")
                .with_input(PortDefinition::new("a", "number").with_label("Value A"))
                .with_input(PortDefinition::new("b", "number").with_label("Value B"))
                .with_output(PortDefinition::new("result", "number").with_label("Result"))
                .with_executor(Arc::new(AddExecutor)),
            // Display-only until the multiply step lands server-side.
            NodeDescriptor::new("Math.Multiply", "Multiply")
                .with_category("Math")
                .with_input(PortDefinition::new("a", "number"))
                .with_input(PortDefinition::new("b", "number"))
                .with_output(PortDefinition::new("result", "number")),
        ])
    }
}

struct AddExecutor;

#[async_trait]
impl NodeExecutor for AddExecutor {
    async fn execute(&self, inputs: ValueMap) -> Result<serde_json::Value, NodeError> {
        let a = require_number(&inputs, "a")?;
        let b = require_number(&inputs, "b")?;
        Ok(json!({ "result": a + b }))
    }
}

fn require_number(inputs: &ValueMap, name: &str) -> Result<f64, NodeError> {
    inputs
        .get(name)
        .ok_or_else(|| NodeError::MissingInput(name.to_string()))?
        .as_f64()
        .ok_or_else(|| NodeError::InvalidInputType {
            field: name.to_string(),
            expected: "number".to_string(),
        })
}
