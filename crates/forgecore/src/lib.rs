//! Core abstractions for the node forge
//!
//! This crate provides the shared data model (node descriptors, provider
//! and executor contracts, graph payloads) and the graph compiler that all
//! other components depend on.

mod compiler;
mod descriptor;
mod error;
mod graph;

pub use compiler::compile;
pub use descriptor::{NodeDescriptor, NodeExecutor, NodeProvider, PortDefinition, ValueMap};
pub use error::{ForgeError, NodeError, RegistryError};
pub use graph::{EditableNode, ExecutionGraph, ExecutionNode, GraphEdge, NodeMeta};

/// Result type for forge operations
pub type Result<T> = std::result::Result<T, ForgeError>;
