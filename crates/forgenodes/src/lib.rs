//! Built-in node providers
//!
//! In-process providers that ship with the server: math operations and the
//! standard agent-flow steps. Both register with the registry's local phase
//! like any other provider.

mod agent;
mod math;

pub use agent::StandardProvider;
pub use math::MathProvider;

use forgecore::NodeProvider;
use std::sync::Arc;

/// All built-in providers, in registration order.
pub fn builtin_providers() -> Vec<Arc<dyn NodeProvider>> {
    vec![Arc::new(StandardProvider), Arc::new(MathProvider)]
}
