use forgecore::{NodeDescriptor, NodeProvider, PortDefinition};

/// Standard agent-flow steps: chat I/O, LLM generation, tool calls, and
/// routing. Display-only; their execution lives in the runtime that
/// consumes the compiled graph.
pub struct StandardProvider;

impl NodeProvider for StandardProvider {
    fn name(&self) -> &str {
        "standard"
    }

    fn nodes(&self) -> forgecore::Result<Vec<NodeDescriptor>> {
        Ok(vec![
            NodeDescriptor::new("Agent.Input", "Chat Input")
                .with_category("I/O")
                .with_description("Receives the user message")
                .with_output(PortDefinition::new("text", "string").with_label("User Message")),
            NodeDescriptor::new("Agent.LLM", "LLM Generation")
                .with_category("Model")
                .with_description("Processes text using an LLM")
                .with_input(PortDefinition::new("prompt", "string").with_label("Prompt"))
                .with_input(PortDefinition::new("model", "string").with_label("Model Name"))
                .with_input(PortDefinition::new("history", "array").with_label("Chat History"))
                .with_output(PortDefinition::new("response", "string").with_label("Response")),
            NodeDescriptor::new("Agent.Tool", "Tool / API Call")
                .with_category("Tools")
                .with_description("Calls an external API or function")
                .with_input(PortDefinition::new("trigger", "string").with_label("Trigger"))
                .with_input(PortDefinition::new("params", "json").with_label("Parameters"))
                .with_output(PortDefinition::new("result", "string").with_label("Result")),
            NodeDescriptor::new("Agent.Router", "Logic Router")
                .with_category("Logic")
                .with_description("Routes flow based on conditions")
                .with_input(PortDefinition::new("input", "string").with_label("Input"))
                .with_output(PortDefinition::new("true", "signal").with_label("True"))
                .with_output(PortDefinition::new("false", "signal").with_label("False")),
            NodeDescriptor::new("Agent.Output", "Chat Output")
                .with_category("I/O")
                .with_description("Sends the final response back to the user")
                .with_input(PortDefinition::new("text", "string").with_label("Final Text")),
        ])
    }
}
