// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod graph;
mod handler_registry;
mod loader;
mod runtime;
mod validation;

pub mod consts;

pub use graph::{Edge, EdgeSource, EdgeTarget, GraphDescriptor, InputValues, NodeDescriptor, OutputValues};
pub use handler_registry::HandlerRegistry;
pub use loader::{load_engine_config, load_graph, parse_graph, EngineConfig, IncludeOptions};
pub use runtime::RuntimeBuilder;
pub use validation::validate_graph;
