// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::handlers::*;
use crate::config::consts::INCLUDE_NODE_TYPE;
use crate::config::{HandlerRegistry, IncludeOptions};
use crate::traits::NodeHandler;

/// Factory for creating local (in-process) node handlers
pub struct LocalHandlerFactory;

impl LocalHandlerFactory {
    /// Create a handler instance for a node type tag
    ///
    /// - "include" -> IncludeHandler (configured from `options`)
    /// - "passthrough" -> PassthroughHandler
    /// - "reverse_text" -> ReverseTextHandler
    /// - "change_text_case" -> ChangeTextCaseHandler
    /// - "prompt_template" -> PromptTemplateHandler
    pub fn create_handler(
        node_type: &str,
        options: &IncludeOptions,
    ) -> Result<Arc<dyn NodeHandler>, String> {
        match node_type {
            INCLUDE_NODE_TYPE => Ok(Arc::new(IncludeHandler::new(options.clone()))),
            "passthrough" => Ok(Arc::new(PassthroughHandler)),
            "reverse_text" => Ok(Arc::new(ReverseTextHandler)),
            "change_text_case" => Ok(Arc::new(ChangeTextCaseHandler)),
            "prompt_template" => Ok(Arc::new(PromptTemplateHandler)),
            _ => Err(format!("Unknown local handler implementation: '{}'", node_type)),
        }
    }

    /// List all available local handler implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![
            INCLUDE_NODE_TYPE,
            "passthrough",
            "reverse_text",
            "change_text_case",
            "prompt_template",
        ]
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(node_type: &str) -> bool {
        Self::list_available_implementations().contains(&node_type)
    }

    /// Register every built-in handler under its own type tag
    pub fn register_builtins(registry: &mut HandlerRegistry, options: &IncludeOptions) {
        for node_type in Self::list_available_implementations() {
            if let Ok(handler) = Self::create_handler(node_type, options) {
                registry.insert(node_type, handler);
            }
        }
    }
}
