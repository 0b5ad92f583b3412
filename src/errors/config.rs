// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Structural defects found while validating a graph descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A circular dependency was detected between nodes
    CyclicDependency {
        /// The cycle path, first node repeated at the end
        cycle: Vec<String>,
    },
    /// An edge references a node id that is not declared in the graph
    UnresolvedEdgeEndpoint {
        /// The offending edge, rendered as `from.output -> to.input`
        edge: String,
        /// The node id that couldn't be resolved
        missing_node: String,
    },
    /// Two nodes share an id
    DuplicateNodeId {
        /// The duplicate node id
        node_id: String,
    },
    /// An edge reads a named output but doesn't say which input receives it
    UnnamedEdgeInput {
        /// The offending edge, rendered as `from.output -> to.input`
        edge: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CyclicDependency { cycle } => {
                write!(f, "Cyclic dependency detected: {}", cycle.join(" -> "))
            }
            ValidationError::UnresolvedEdgeEndpoint { edge, missing_node } => {
                write!(
                    f,
                    "Edge '{}' references node '{}' which does not exist",
                    edge, missing_node
                )
            }
            ValidationError::DuplicateNodeId { node_id } => {
                write!(f, "Duplicate node ID: '{}'", node_id)
            }
            ValidationError::UnnamedEdgeInput { edge } => {
                write!(
                    f,
                    "Edge '{}' reads a named output and must name its target input",
                    edge
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
