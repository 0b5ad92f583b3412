// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::config::consts::WILDCARD_KEY;

/// Named values flowing into a node.
pub type InputValues = HashMap<String, Value>;

/// Named values produced by a node.
pub type OutputValues = HashMap<String, Value>;

/// A single node in a graph document.
///
/// The `type` tag selects the handler that executes the node. The optional
/// `configuration` is merged into the node's inputs when it runs; values
/// delivered over edges take precedence over configuration for the same key.
///
/// # Example
/// ```json
/// { "id": "greeting", "type": "prompt_template", "configuration": { "template": "Hi {{name}}" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub configuration: HashMap<String, Value>,
}

impl NodeDescriptor {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            configuration: HashMap::new(),
        }
    }

    /// Attach a static configuration value.
    pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.configuration.insert(key.into(), value);
        self
    }
}

/// Source side of an edge: a node and one of its output keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeSource {
    pub node: String,
    pub output: String,
}

/// Destination side of an edge: a node and the input key it receives under.
///
/// `input` may be omitted only on wildcard edges; validation rejects a named
/// output delivered without a target key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeTarget {
    pub node: String,
    #[serde(default = "wildcard")]
    pub input: String,
}

fn wildcard() -> String {
    WILDCARD_KEY.to_string()
}

/// A directed data link `(from.node, from.output) -> (to.node, to.input)`.
///
/// An edge whose source output is `"*"` forwards every output of the source
/// node under its original key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Edge {
    pub from: EdgeSource,
    pub to: EdgeTarget,
}

impl Edge {
    pub fn new(
        from_node: impl Into<String>,
        output: impl Into<String>,
        to_node: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            from: EdgeSource {
                node: from_node.into(),
                output: output.into(),
            },
            to: EdgeTarget {
                node: to_node.into(),
                input: input.into(),
            },
        }
    }

    /// Edge forwarding all outputs of `from_node` to `to_node`.
    pub fn wildcard(from_node: impl Into<String>, to_node: impl Into<String>) -> Self {
        Self::new(from_node, WILDCARD_KEY, to_node, WILDCARD_KEY)
    }

    pub fn is_wildcard(&self) -> bool {
        self.from.output == WILDCARD_KEY
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.from.node, self.from.output, self.to.node, self.to.input
        )
    }
}

/// Static, serializable description of a graph: its nodes and the edges between them.
///
/// Descriptors are plain data. They can be loaded from a JSON document with
/// [`crate::config::load_graph`] or assembled in memory with the builder methods,
/// and are never mutated by a traversal.
///
/// # Examples
///
/// ```
/// use boardwalk::config::{Edge, GraphDescriptor, NodeDescriptor};
///
/// let graph = GraphDescriptor::new()
///     .with_node(NodeDescriptor::new("in", "input"))
///     .with_node(NodeDescriptor::new("out", "output"))
///     .with_edge(Edge::new("in", "text", "out", "text"));
///
/// assert_eq!(graph.nodes.len(), 2);
/// assert_eq!(graph.edges.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub nodes: Vec<NodeDescriptor>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: NodeDescriptor) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Label used in log output: the title when present, otherwise a node count.
    pub fn label(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("<untitled graph, {} nodes>", self.nodes.len()),
        }
    }
}
