// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error type for graph traversal and node dispatch.
//!
//! Every structural variant carries enough context (node id, key, path) to
//! locate the defect in the graph document. None of them are retried: they
//! surface unchanged to the caller of `traverse` or `include`. Failures raised
//! inside a handler travel through the engine as [`TraversalError::Handler`]
//! without being rewrapped.

use std::path::PathBuf;
use thiserror::Error;

use crate::errors::load::join_errors;
use crate::errors::{GraphLoadError, ValidationError};

#[derive(Error, Debug)]
pub enum TraversalError {
    /// An include node was invoked without a non-empty `path` input.
    #[error("include requires a non-empty string 'path' input")]
    MissingPath,

    /// The nested graph document could not be read, parsed, or validated.
    #[error("failed to load graph '{path}': {source}")]
    GraphLoad {
        path: String,
        #[source]
        source: GraphLoadError,
    },

    /// No handler is registered for a node's type tag.
    #[error("no handler registered for node type '{node_type}'{}", at_node(.node_id))]
    UnknownNodeType {
        node_type: String,
        node_id: Option<String>,
    },

    /// An edge references an output key the source node did not produce.
    #[error("node '{node_id}' produced no output '{key}' for edge to '{to_node}'")]
    MissingOutputKey {
        node_id: String,
        key: String,
        to_node: String,
    },

    /// The graph's edges form a dependency cycle.
    #[error("cyclic graph: {}", .cycle.join(" -> "))]
    CyclicGraph { cycle: Vec<String> },

    /// The graph has duplicate node ids or dangling edge endpoints.
    #[error("invalid graph: {}", join_errors(.errors))]
    InvalidGraph { errors: Vec<ValidationError> },

    /// A graph includes itself, directly or through other documents.
    #[error("include cycle: {}", display_chain(.chain))]
    IncludeCycle { chain: Vec<PathBuf> },

    /// Included graphs are nested deeper than the configured limit.
    #[error("include depth {depth} exceeds maximum of {max}")]
    IncludeDepthExceeded { depth: usize, max: usize },

    /// The external input source or output sink failed.
    #[error("boundary error: {0}")]
    Boundary(String),

    /// A failure raised inside a node handler.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl TraversalError {
    /// Attach the id of the node being dispatched when the error doesn't carry one yet.
    pub fn at_node(self, id: &str) -> Self {
        match self {
            TraversalError::UnknownNodeType {
                node_type,
                node_id: None,
            } => TraversalError::UnknownNodeType {
                node_type,
                node_id: Some(id.to_string()),
            },
            other => other,
        }
    }
}

impl From<Vec<ValidationError>> for TraversalError {
    fn from(errors: Vec<ValidationError>) -> Self {
        let cycle = errors.iter().find_map(|e| match e {
            ValidationError::CyclicDependency { cycle } => Some(cycle.clone()),
            _ => None,
        });
        match cycle {
            Some(cycle) => TraversalError::CyclicGraph { cycle },
            None => TraversalError::InvalidGraph { errors },
        }
    }
}

fn at_node(node_id: &Option<String>) -> String {
    match node_id {
        Some(id) => format!(" (node '{}')", id),
        None => String::new(),
    }
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
