//! Node definition registry
//!
//! This crate builds and owns the catalog of invocable node descriptors,
//! merging in-process providers, on-disk provider manifests, and
//! definitions proxied from a remote node service.

mod config;
mod loader;
mod registry;
mod remote;

pub use config::RegistryConfig;
pub use loader::LocalLoader;
pub use registry::NodeRegistry;
pub use remote::{RemoteNodeService, RemoteProxyExecutor};
