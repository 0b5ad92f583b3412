// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation for graph descriptors.
//!
//! Graphs are checked at the start of every traversal, before any node runs.
//! The loader only checks a document's shape, so documents and descriptors built
//! in memory go through the same checks. They run in a fixed order:
//!
//! 1. **Uniqueness**: every node id appears once
//! 2. **Reference validation**: every edge endpoint names a declared node
//! 3. **Input naming**: an edge reading a named output names its target input
//! 4. **Cycle detection**: DFS over the edge set, reporting the cycle path
//!
//! Cycle detection needs a structurally valid graph, so it is skipped when
//! any of the earlier stages reported errors.
//!
//! # Cycle Detection
//!
//! Depth-first search with an explicit recursion stack ("three colors"):
//! a neighbor that is still on the stack closes a cycle. Roots and neighbors
//! are visited in declaration order, so the reported path is stable for a given
//! document. O(V + E) time, O(V) space.
//!
//! # Example
//!
//! ```rust
//! use boardwalk::config::{validate_graph, Edge, GraphDescriptor, NodeDescriptor};
//! use boardwalk::errors::ValidationError;
//!
//! let graph = GraphDescriptor::new()
//!     .with_node(NodeDescriptor::new("a", "passthrough"))
//!     .with_node(NodeDescriptor::new("b", "passthrough"))
//!     .with_edge(Edge::new("a", "x", "b", "x"))
//!     .with_edge(Edge::new("b", "y", "a", "y"));
//!
//! match validate_graph(&graph) {
//!     Err(errors) => assert!(matches!(errors[0], ValidationError::CyclicDependency { .. })),
//!     Ok(()) => unreachable!(),
//! }
//! ```

use std::collections::{HashMap, HashSet};

use crate::config::consts::WILDCARD_KEY;
use crate::config::GraphDescriptor;
use crate::errors::ValidationError;

/// Validate a graph descriptor for uniqueness, resolvable edges and acyclicity.
///
/// Errors from the first two stages are accumulated so a document's defects can
/// be fixed in one pass.
pub fn validate_graph(graph: &GraphDescriptor) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_node_ids(graph) {
        errors.extend(duplicate_errors);
    }

    if let Err(unresolved_errors) = validate_edge_references(graph) {
        errors.extend(unresolved_errors);
    }

    if let Err(input_errors) = validate_edge_inputs(graph) {
        errors.extend(input_errors);
    }

    if errors.is_empty() {
        if let Err(cycle_errors) = validate_acyclic_graph(graph) {
            errors.extend(cycle_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_node_ids(graph: &GraphDescriptor) -> Result<(), Vec<ValidationError>> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    for node in &graph.nodes {
        if !seen_ids.insert(node.id.as_str()) {
            errors.push(ValidationError::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Every edge's `from.node` and `to.node` must be declared. Both endpoints are
/// checked so a single bad edge can report two missing nodes.
fn validate_edge_references(graph: &GraphDescriptor) -> Result<(), Vec<ValidationError>> {
    let node_ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let mut errors = Vec::new();

    for edge in &graph.edges {
        for endpoint in [&edge.from.node, &edge.to.node] {
            if !node_ids.contains(endpoint.as_str()) {
                errors.push(ValidationError::UnresolvedEdgeEndpoint {
                    edge: edge.to_string(),
                    missing_node: endpoint.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Only a wildcard edge may omit `to.input` (which then defaults to `"*"`).
/// A named output delivered under `"*"` would land under the literal key.
fn validate_edge_inputs(graph: &GraphDescriptor) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = graph
        .edges
        .iter()
        .filter(|edge| !edge.is_wildcard() && edge.to.input == WILDCARD_KEY)
        .map(|edge| ValidationError::UnnamedEdgeInput {
            edge: edge.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_acyclic_graph(graph: &GraphDescriptor) -> Result<(), Vec<ValidationError>> {
    // producer -> [consumers], in edge declaration order
    let mut adjacency: HashMap<&str, Vec<&str>> = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), Vec::new()))
        .collect();

    for edge in &graph.edges {
        if let Some(consumers) = adjacency.get_mut(edge.from.node.as_str()) {
            consumers.push(edge.to.node.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for node in &graph.nodes {
        if !visited.contains(node.id.as_str()) {
            if let Some(cycle) = dfs_cycle_detection(
                node.id.as_str(),
                &adjacency,
                &mut visited,
                &mut rec_stack,
                &mut path,
            ) {
                return Err(vec![ValidationError::CyclicDependency { cycle }]);
            }
        }
    }

    Ok(())
}

/// DFS from `node`; returns the cycle path (closed, first node repeated) when a
/// back edge to a node still on the recursion stack is found.
fn dfs_cycle_detection<'g>(
    node: &'g str,
    adjacency: &HashMap<&'g str, Vec<&'g str>>,
    visited: &mut HashSet<&'g str>,
    rec_stack: &mut HashSet<&'g str>,
    path: &mut Vec<&'g str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(neighbors) = adjacency.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, adjacency, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let cycle_start = path.iter().position(|&x| x == neighbor).unwrap_or(0);
                let mut cycle: Vec<String> = path[cycle_start..].iter().map(|s| s.to_string()).collect();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}
