// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::NodeHandler;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry mapping node type tags to the handlers that execute them.
///
/// Handlers are stored as `Arc<dyn NodeHandler>` so a registry can be cloned
/// cheaply into several traversal contexts and shared across concurrent
/// independent runs. A traversal never mutates the registry.
///
/// # Examples
///
/// ```
/// use boardwalk::backends::local::PassthroughHandler;
/// use boardwalk::config::HandlerRegistry;
/// use std::sync::Arc;
///
/// let mut registry = HandlerRegistry::new();
/// registry.insert("passthrough", Arc::new(PassthroughHandler));
///
/// assert!(registry.contains_key("passthrough"));
/// assert_eq!(registry.get("passthrough").unwrap().name(), "passthrough");
/// assert!(registry.get("unregistered").is_none());
/// ```
#[derive(Clone, Default)]
pub struct HandlerRegistry(pub HashMap<String, Arc<dyn NodeHandler>>);

impl HandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Register a handler under a type tag, replacing any previous registration
    pub fn insert(&mut self, node_type: impl Into<String>, handler: Arc<dyn NodeHandler>) {
        self.0.insert(node_type.into(), handler);
    }

    /// Builder-style variant of [`HandlerRegistry::insert`]
    pub fn with(mut self, node_type: impl Into<String>, handler: Arc<dyn NodeHandler>) -> Self {
        self.insert(node_type, handler);
        self
    }

    /// Get the handler for a type tag
    pub fn get(&self, node_type: &str) -> Option<&Arc<dyn NodeHandler>> {
        self.0.get(node_type)
    }

    pub fn contains_key(&self, node_type: &str) -> bool {
        self.0.contains_key(node_type)
    }

    /// All registered type tags
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.0.keys().collect();
        types.sort();
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &self.0.len())
            .field("node_types", &types)
            .finish()
    }
}

impl From<HashMap<String, Arc<dyn NodeHandler>>> for HandlerRegistry {
    fn from(map: HashMap<String, Arc<dyn NodeHandler>>) -> Self {
        Self(map)
    }
}

impl From<HandlerRegistry> for HashMap<String, Arc<dyn NodeHandler>> {
    fn from(registry: HandlerRegistry) -> Self {
        registry.0
    }
}
