//! Ordered, immutable set of registered handlers.
//!
//! # Responsibilities
//! - Keep handlers in registration order
//! - Answer capability lookups for the dispatchers
//! - List handler names for discovery
//!
//! # Design Decisions
//! - Built once through [`RegistryBuilder`]; read-only afterwards
//! - Names are not unique: two handlers may share a name and both are listed
//! - O(n) scans; registries hold a handful of handlers

use std::fmt;
use std::sync::Arc;

use crate::registry::handler::{
    AnnotationSource, Handler, QuerySource, TagKeySource, TagValueSource,
};

struct Entry {
    name: String,
    handler: Arc<dyn Handler>,
}

/// Collects handlers before serving starts.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Entry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler under `name`.
    pub fn register(self, name: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.register_shared(name, Arc::new(handler))
    }

    /// Append a handler that is also held elsewhere.
    pub fn register_shared(mut self, name: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        let name = name.into();
        tracing::debug!(handler = %name, position = self.entries.len(), "Registering handler");
        self.entries.push(Entry { name, handler });
        self
    }

    /// Freeze the registry. No handler can be added afterwards.
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

/// Read-only handler registry shared by all requests.
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of every handler, sorted ascending, duplicates kept.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.name.clone()).collect();
        names.sort();
        names
    }

    /// The first handler registered under `target` that can answer queries.
    pub fn query_source(&self, target: &str) -> Option<(&str, &dyn QuerySource)> {
        self.entries
            .iter()
            .filter(|e| e.name == target)
            .find_map(|e| e.handler.query().map(|source| (e.name.as_str(), source)))
    }

    pub fn annotation_sources(&self) -> impl Iterator<Item = (&str, &dyn AnnotationSource)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.handler.annotations().map(|source| (e.name.as_str(), source)))
    }

    pub fn tag_key_sources(&self) -> impl Iterator<Item = (&str, &dyn TagKeySource)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.handler.tag_keys().map(|source| (e.name.as_str(), source)))
    }

    pub fn tag_value_sources(&self) -> impl Iterator<Item = (&str, &dyn TagValueSource)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.handler.tag_values().map(|source| (e.name.as_str(), source)))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.name))
            .finish()
    }
}
