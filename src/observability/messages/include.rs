// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for nested graph inclusion.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A nested graph was loaded and is about to run.
///
/// # Log Level
/// `info!`
///
/// # Example
/// ```
/// use boardwalk::observability::messages::include::IncludeStarted;
///
/// let msg = IncludeStarted {
///     path: "graphs/summarize.json",
///     forwarded_keys: 2,
///     depth: 1,
/// };
///
/// assert!(msg.to_string().contains("graphs/summarize.json"));
/// ```
pub struct IncludeStarted<'a> {
    pub path: &'a str,
    pub forwarded_keys: usize,
    pub depth: usize,
}

impl Display for IncludeStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Including graph '{}' at depth {} with {} forwarded inputs",
            self.path, self.depth, self.forwarded_keys
        )
    }
}

impl StructuredLog for IncludeStarted<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            forwarded_keys = self.forwarded_keys,
            depth = self.depth,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "include",
            span_name = name,
            path = self.path,
            depth = self.depth,
        )
    }
}

/// A nested graph finished; its captured outputs become the include node's outputs.
///
/// # Log Level
/// `info!`
pub struct IncludeCompleted<'a> {
    pub path: &'a str,
    pub output_count: usize,
    pub duration: std::time::Duration,
}

impl Display for IncludeCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Included graph '{}' returned {} outputs in {:?}",
            self.path, self.output_count, self.duration
        )
    }
}

impl StructuredLog for IncludeCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            output_count = self.output_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "include_completed",
            span_name = name,
            path = self.path,
            duration = ?self.duration,
        )
    }
}
