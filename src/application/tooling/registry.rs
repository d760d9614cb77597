use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::executor::{ToolExecutor, ToolSpec};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool '{name}' is already registered")]
    Duplicate { name: String },
}

/// A tool spec paired with the executor that fulfils it.
#[derive(Clone)]
pub struct RegisteredTool {
    pub spec: ToolSpec,
    pub executor: Arc<dyn ToolExecutor>,
}

/// The set of tools available to one agent. Immutable after assembly;
/// registration order is preserved for catalogue rendering, and lookup
/// is exact and case-sensitive.
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        spec: ToolSpec,
        executor: Arc<dyn ToolExecutor>,
    ) -> Result<(), RegistryError> {
        if self.index.contains_key(&spec.name) {
            return Err(RegistryError::Duplicate {
                name: spec.name.clone(),
            });
        }
        debug!(tool = %spec.name, "Registered tool");
        self.index.insert(spec.name.clone(), self.entries.len());
        self.entries.push(RegisteredTool { spec, executor });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredTool> {
        self.index
            .get(name)
            .and_then(|&position| self.entries.get(position))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Specs in registration order.
    pub fn specs(&self) -> impl Iterator<Item = &ToolSpec> {
        self.entries.iter().map(|entry| &entry.spec)
    }

    /// Tool names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.spec.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
