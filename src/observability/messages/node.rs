// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for node dispatch events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Node execution started.
///
/// # Log Level
/// `debug!` - Emitted for every node
///
/// # Example
/// ```
/// use boardwalk::observability::messages::node::NodeExecutionStarted;
///
/// let msg = NodeExecutionStarted {
///     node_id: "reverse",
///     node_type: "reverse_text",
/// };
///
/// assert_eq!(msg.to_string(), "Node 'reverse' (reverse_text) execution started");
/// ```
pub struct NodeExecutionStarted<'a> {
    pub node_id: &'a str,
    pub node_type: &'a str,
}

impl Display for NodeExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' ({}) execution started",
            self.node_id, self.node_type
        )
    }
}

impl StructuredLog for NodeExecutionStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            node_type = self.node_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node_execution",
            span_name = name,
            node_id = self.node_id,
            node_type = self.node_type,
        )
    }
}

/// Node execution finished.
///
/// # Log Level
/// `debug!` - Emitted for every node
pub struct NodeExecutionCompleted<'a> {
    pub node_id: &'a str,
    pub node_type: &'a str,
    pub duration: std::time::Duration,
}

impl Display for NodeExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' ({}) finished in {:?}",
            self.node_id, self.node_type, self.duration
        )
    }
}

impl StructuredLog for NodeExecutionCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            node_type = self.node_type,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node_completed",
            span_name = name,
            node_id = self.node_id,
            duration = ?self.duration,
        )
    }
}

/// Node execution failed; the error propagates to the traversal's caller.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct NodeExecutionFailed<'a> {
    pub node_id: &'a str,
    pub node_type: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for NodeExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' ({}) failed: {}",
            self.node_id, self.node_type, self.error
        )
    }
}

impl StructuredLog for NodeExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            node_type = self.node_type,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "node_failed",
            span_name = name,
            node_id = self.node_id,
            error = %self.error,
        )
    }
}

/// Boundary node is exchanging values with the world outside the graph.
///
/// # Log Level
/// `debug!`
pub struct BoundaryExchange<'a> {
    pub node_id: &'a str,
    pub direction: &'a str,
    pub keys: &'a [String],
}

impl Display for BoundaryExchange<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' {} external values: [{}]",
            self.node_id,
            self.direction,
            self.keys.join(", ")
        )
    }
}

impl StructuredLog for BoundaryExchange<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            direction = self.direction,
            key_count = self.keys.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "boundary_exchange",
            span_name = name,
            node_id = self.node_id,
            direction = self.direction,
        )
    }
}
