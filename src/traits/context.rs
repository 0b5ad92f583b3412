// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The capability boundary a running traversal uses to reach the outside world.
//!
//! A [`TraversalContext`] bundles five capabilities: handler lookup, logging,
//! progress reporting, and the two external boundary callbacks. The sinks and
//! boundary endpoints are themselves small traits so a context can be assembled
//! from independent parts, and so a derived context can replace some of them
//! while delegating the rest to its parent.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{InputValues, NodeDescriptor, OutputValues};
use crate::errors::TraversalError;
use crate::traits::NodeHandler;

/// Callback invoked once when a node finishes executing, successfully or not.
pub type ProgressCompletion = Box<dyn FnOnce() + Send>;

/// Destination for free-form log messages emitted by handlers.
///
/// Implementations must not fail; contexts additionally discard panics raised
/// by a sink.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

/// Observer notified when each node starts; the returned callback marks its end.
pub trait ProgressSink: Send + Sync {
    fn node_started(&self, node: &NodeDescriptor) -> ProgressCompletion;
}

/// Supplies values when the graph as a whole needs external input.
#[async_trait]
pub trait InputSource: Send + Sync {
    async fn request(&self, keys: &[String]) -> Result<InputValues, TraversalError>;
}

/// Accepts values the graph as a whole delivers as external output.
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn provide(&self, values: OutputValues) -> Result<(), TraversalError>;
}

/// Capability set available to a traversal run and to every handler it invokes.
#[async_trait]
pub trait TraversalContext: Send + Sync {
    /// Look up the handler for a node type; `UnknownNodeType` when none is registered.
    fn resolve_handler(&self, node_type: &str) -> Result<Arc<dyn NodeHandler>, TraversalError>;

    /// Emit a log message. Never fails.
    fn log(&self, message: &str);

    /// Called when `node` begins; the result is invoked when it finishes.
    fn report_progress(&self, node: &NodeDescriptor) -> ProgressCompletion;

    /// Suspend until the external world supplies values for `keys`.
    async fn request_external_input(&self, keys: &[String]) -> Result<InputValues, TraversalError>;

    /// Suspend until the external world has accepted `values`.
    async fn provide_external_output(&self, values: OutputValues) -> Result<(), TraversalError>;

    /// Canonical paths of the graph documents currently being traversed,
    /// outermost first. Used by `include` to reject cyclic inclusion.
    fn include_chain(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}
