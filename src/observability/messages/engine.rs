// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for traversal lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Traversal of a validated graph is starting.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TraversalStarted<'a> {
    pub graph: &'a str,
    pub node_count: usize,
    pub edge_count: usize,
    pub include_depth: usize,
}

impl Display for TraversalStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting traversal of {}: {} nodes, {} edges, include_depth={}",
            self.graph, self.node_count, self.edge_count, self.include_depth
        )
    }
}

impl StructuredLog for TraversalStarted<'_> {
    fn log(&self) {
        tracing::info!(
            graph = self.graph,
            node_count = self.node_count,
            edge_count = self.edge_count,
            include_depth = self.include_depth,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "traversal",
            span_name = name,
            graph = self.graph,
            node_count = self.node_count,
            include_depth = self.include_depth,
        )
    }
}

/// Traversal finished and delivered its final outputs.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use boardwalk::observability::messages::engine::TraversalCompleted;
/// use std::time::Duration;
///
/// let msg = TraversalCompleted {
///     graph: "echo",
///     nodes_executed: 2,
///     output_count: 1,
///     duration: Duration::from_millis(3),
/// };
///
/// assert!(msg.to_string().contains("2 nodes"));
/// ```
pub struct TraversalCompleted<'a> {
    pub graph: &'a str,
    pub nodes_executed: usize,
    pub output_count: usize,
    pub duration: std::time::Duration,
}

impl Display for TraversalCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Traversal of {} completed: {} nodes executed, {} outputs in {:?}",
            self.graph, self.nodes_executed, self.output_count, self.duration
        )
    }
}

impl StructuredLog for TraversalCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            graph = self.graph,
            nodes_executed = self.nodes_executed,
            output_count = self.output_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "traversal_completed",
            span_name = name,
            graph = self.graph,
            nodes_executed = self.nodes_executed,
            duration = ?self.duration,
        )
    }
}

/// Graph was rejected before any node ran.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct TraversalRejected<'a> {
    pub graph: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TraversalRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Traversal of {} rejected: {}", self.graph, self.error)
    }
}

impl StructuredLog for TraversalRejected<'_> {
    fn log(&self) {
        tracing::error!(
            graph = self.graph,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "traversal_rejected",
            span_name = name,
            graph = self.graph,
            error = %self.error,
        )
    }
}
