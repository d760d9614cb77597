//! Tool specs, executors, and the registry the agent dispatches through.

mod executor;
mod fun;
mod logistics;
mod registry;

use std::sync::Arc;

pub use executor::{require_str, ParamSpec, ToolError, ToolExecutor, ToolSpec};
pub use fun::{FindJoke, TellFortune};
pub use logistics::{CheckConditions, DispatchTruck, FindRoutes};
pub use registry::{RegisteredTool, RegistryError, ToolRegistry};

/// Registry with every built-in demo tool, in catalogue order.
pub fn builtin_registry() -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(FindRoutes::spec(), Arc::new(FindRoutes))?;
    registry.register(CheckConditions::spec(), Arc::new(CheckConditions))?;
    registry.register(DispatchTruck::spec(), Arc::new(DispatchTruck))?;
    registry.register(FindJoke::spec(), Arc::new(FindJoke))?;
    registry.register(TellFortune::spec(), Arc::new(TellFortune))?;
    Ok(registry)
}
