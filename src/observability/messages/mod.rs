// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message is a small borrowed struct implementing `Display` for the
//! human-readable line and [`StructuredLog`] for emitting it through `tracing`
//! with typed fields attached.
//!
//! * `engine` - traversal lifecycle events
//! * `node` - per-node dispatch events
//! * `include` - nested graph inclusion events
//!
//! # Usage Pattern
//!
//! ```rust
//! use boardwalk::observability::messages::engine::TraversalStarted;
//! use boardwalk::observability::messages::StructuredLog;
//!
//! let msg = TraversalStarted {
//!     graph: "summarizer",
//!     node_count: 5,
//!     edge_count: 6,
//!     include_depth: 0,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod engine;
pub mod include;
pub mod node;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
