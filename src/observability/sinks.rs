// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Default log and progress sinks backed by `tracing`.

use std::time::Instant;

use crate::config::NodeDescriptor;
use crate::observability::messages::node::{NodeExecutionCompleted, NodeExecutionStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::{LogSink, ProgressCompletion, ProgressSink};

/// Forwards handler log messages to `tracing::info!` under the `graph_log` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        tracing::info!(target: "graph_log", "{}", message);
    }
}

/// Emits a start event per node and a completion event carrying its duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn node_started(&self, node: &NodeDescriptor) -> ProgressCompletion {
        NodeExecutionStarted {
            node_id: &node.id,
            node_type: &node.node_type,
        }
        .log();

        let node_id = node.id.clone();
        let node_type = node.node_type.clone();
        let started = Instant::now();

        Box::new(move || {
            NodeExecutionCompleted {
                node_id: &node_id,
                node_type: &node_type,
                duration: started.elapsed(),
            }
            .log();
        })
    }
}

/// Discards log messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn log(&self, _message: &str) {}
}

/// Reports nothing; the completion callback does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn node_started(&self, _node: &NodeDescriptor) -> ProgressCompletion {
        Box::new(|| {})
    }
}
