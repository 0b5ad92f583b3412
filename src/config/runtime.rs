// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::LocalHandlerFactory;
use crate::config::{EngineConfig, HandlerRegistry};

/// Runtime builder - assembles the handler registry a traversal needs from configuration.
///
/// # Examples
///
/// ```
/// use boardwalk::config::{EngineConfig, RuntimeBuilder};
///
/// let registry = RuntimeBuilder::from_config(&EngineConfig::default());
///
/// assert!(registry.contains_key("include"));
/// assert!(registry.contains_key("reverse_text"));
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a registry holding every built-in handler, with `include`
    /// configured from `cfg.include`.
    pub fn from_config(cfg: &EngineConfig) -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        LocalHandlerFactory::register_builtins(&mut registry, &cfg.include);
        registry
    }
}
