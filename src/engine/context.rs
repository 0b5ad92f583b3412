// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concrete traversal contexts.
//!
//! [`BaseTraversalContext`] is the root of a run: it owns the handler registry,
//! the sinks and the external boundary endpoints. [`DerivedContext`] wraps a
//! parent context together with a [`ContextOverrides`] table. Each capability
//! consults the table first and otherwise forwards to the parent, which is how
//! `include` pins a nested graph's boundary while inheriting logging, progress
//! reporting and handler lookup.
//!
//! ```text
//! DerivedContext ──overrides?──▶ FixedInput / CapturedOutput
//!       │
//!       └─otherwise──▶ parent (BaseTraversalContext or another DerivedContext)
//! ```

use async_trait::async_trait;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::{HandlerRegistry, InputValues, NodeDescriptor, OutputValues};
use crate::errors::TraversalError;
use crate::observability::sinks::{TracingLogSink, TracingProgressSink};
use crate::traits::{
    InputSource, LogSink, NodeHandler, OutputSink, ProgressCompletion, ProgressSink,
    TraversalContext,
};

fn log_swallowing(sink: &dyn LogSink, message: &str) {
    let _ = catch_unwind(AssertUnwindSafe(|| sink.log(message)));
}

fn progress_swallowing(sink: &dyn ProgressSink, node: &NodeDescriptor) -> ProgressCompletion {
    match catch_unwind(AssertUnwindSafe(|| sink.node_started(node))) {
        Ok(completion) => Box::new(move || {
            let _ = catch_unwind(AssertUnwindSafe(completion));
        }),
        Err(_) => Box::new(|| {}),
    }
}

/// Input source that answers every request with an empty map.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyInput;

#[async_trait]
impl InputSource for EmptyInput {
    async fn request(&self, _keys: &[String]) -> Result<InputValues, TraversalError> {
        Ok(InputValues::new())
    }
}

/// Output sink that accepts and drops every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardOutput;

#[async_trait]
impl OutputSink for DiscardOutput {
    async fn provide(&self, _values: OutputValues) -> Result<(), TraversalError> {
        Ok(())
    }
}

/// Input source returning a fixed, pre-supplied map regardless of the keys requested.
#[derive(Debug, Clone, Default)]
pub struct FixedInput {
    values: InputValues,
}

impl FixedInput {
    pub fn new(values: InputValues) -> Self {
        Self { values }
    }
}

#[async_trait]
impl InputSource for FixedInput {
    async fn request(&self, _keys: &[String]) -> Result<InputValues, TraversalError> {
        Ok(self.values.clone())
    }
}

/// Output sink recording delivered values into a local slot.
///
/// Each delivery replaces the slot, so it holds exactly what the last
/// delivery supplied.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    slot: Mutex<OutputValues>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything captured so far, leaving the slot empty.
    pub fn take(&self) -> OutputValues {
        match self.slot.lock() {
            Ok(mut slot) => std::mem::take(&mut *slot),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl OutputSink for CapturedOutput {
    async fn provide(&self, values: OutputValues) -> Result<(), TraversalError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| TraversalError::Boundary("captured output slot poisoned".into()))?;
        *slot = values;
        Ok(())
    }
}

/// Root context for a traversal run.
///
/// # Example
///
/// ```
/// use boardwalk::config::{EngineConfig, RuntimeBuilder};
/// use boardwalk::engine::{BaseTraversalContext, FixedInput};
/// use boardwalk::observability::sinks::NoopProgressSink;
/// use std::sync::Arc;
///
/// let context = BaseTraversalContext::new(RuntimeBuilder::from_config(&EngineConfig::default()))
///     .with_progress_sink(Arc::new(NoopProgressSink))
///     .with_input_source(Arc::new(FixedInput::default()));
/// # let _ = context;
/// ```
pub struct BaseTraversalContext {
    handlers: HandlerRegistry,
    log_sink: Arc<dyn LogSink>,
    progress_sink: Arc<dyn ProgressSink>,
    input_source: Arc<dyn InputSource>,
    output_sink: Arc<dyn OutputSink>,
    root_path: Option<PathBuf>,
}

impl BaseTraversalContext {
    /// Context with tracing-backed sinks, an empty external input and a discarding output.
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self {
            handlers,
            log_sink: Arc::new(TracingLogSink),
            progress_sink: Arc::new(TracingProgressSink),
            input_source: Arc::new(EmptyInput),
            output_sink: Arc::new(DiscardOutput),
            root_path: None,
        }
    }

    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = sink;
        self
    }

    pub fn with_progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress_sink = sink;
        self
    }

    pub fn with_input_source(mut self, source: Arc<dyn InputSource>) -> Self {
        self.input_source = source;
        self
    }

    pub fn with_output_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.output_sink = sink;
        self
    }

    /// Record the document the root graph was loaded from, so an include of
    /// that same document is reported as a cycle.
    pub fn with_root_path(mut self, path: PathBuf) -> Self {
        self.root_path = Some(path);
        self
    }
}

#[async_trait]
impl TraversalContext for BaseTraversalContext {
    fn resolve_handler(&self, node_type: &str) -> Result<Arc<dyn NodeHandler>, TraversalError> {
        self.handlers
            .get(node_type)
            .cloned()
            .ok_or_else(|| TraversalError::UnknownNodeType {
                node_type: node_type.to_string(),
                node_id: None,
            })
    }

    fn log(&self, message: &str) {
        log_swallowing(self.log_sink.as_ref(), message);
    }

    fn report_progress(&self, node: &NodeDescriptor) -> ProgressCompletion {
        progress_swallowing(self.progress_sink.as_ref(), node)
    }

    async fn request_external_input(&self, keys: &[String]) -> Result<InputValues, TraversalError> {
        self.input_source.request(keys).await
    }

    async fn provide_external_output(&self, values: OutputValues) -> Result<(), TraversalError> {
        self.output_sink.provide(values).await
    }

    fn include_chain(&self) -> Vec<PathBuf> {
        self.root_path.iter().cloned().collect()
    }
}

/// Capabilities a [`DerivedContext`] answers itself instead of asking its parent.
///
/// Every entry is optional; `None` means "delegate".
#[derive(Default)]
pub struct ContextOverrides {
    pub handlers: Option<HandlerRegistry>,
    pub log_sink: Option<Arc<dyn LogSink>>,
    pub progress_sink: Option<Arc<dyn ProgressSink>>,
    pub input_source: Option<Arc<dyn InputSource>>,
    pub output_sink: Option<Arc<dyn OutputSink>>,
    /// Appended to the parent's include chain.
    pub include_path: Option<PathBuf>,
}

impl ContextOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = Some(handlers);
        self
    }

    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = Some(sink);
        self
    }

    pub fn with_progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress_sink = Some(sink);
        self
    }

    pub fn with_input_source(mut self, source: Arc<dyn InputSource>) -> Self {
        self.input_source = Some(source);
        self
    }

    pub fn with_output_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.output_sink = Some(sink);
        self
    }

    pub fn with_include_path(mut self, path: PathBuf) -> Self {
        self.include_path = Some(path);
        self
    }
}

/// Context composed of a parent reference and an override table.
pub struct DerivedContext<'p> {
    parent: &'p dyn TraversalContext,
    overrides: ContextOverrides,
}

impl<'p> DerivedContext<'p> {
    pub fn new(parent: &'p dyn TraversalContext, overrides: ContextOverrides) -> Self {
        Self { parent, overrides }
    }
}

#[async_trait]
impl TraversalContext for DerivedContext<'_> {
    fn resolve_handler(&self, node_type: &str) -> Result<Arc<dyn NodeHandler>, TraversalError> {
        match &self.overrides.handlers {
            Some(handlers) => handlers.get(node_type).cloned().ok_or_else(|| {
                TraversalError::UnknownNodeType {
                    node_type: node_type.to_string(),
                    node_id: None,
                }
            }),
            None => self.parent.resolve_handler(node_type),
        }
    }

    fn log(&self, message: &str) {
        match &self.overrides.log_sink {
            Some(sink) => log_swallowing(sink.as_ref(), message),
            None => self.parent.log(message),
        }
    }

    fn report_progress(&self, node: &NodeDescriptor) -> ProgressCompletion {
        match &self.overrides.progress_sink {
            Some(sink) => progress_swallowing(sink.as_ref(), node),
            None => self.parent.report_progress(node),
        }
    }

    async fn request_external_input(&self, keys: &[String]) -> Result<InputValues, TraversalError> {
        match &self.overrides.input_source {
            Some(source) => source.request(keys).await,
            None => self.parent.request_external_input(keys).await,
        }
    }

    async fn provide_external_output(&self, values: OutputValues) -> Result<(), TraversalError> {
        match &self.overrides.output_sink {
            Some(sink) => sink.provide(values).await,
            None => self.parent.provide_external_output(values).await,
        }
    }

    fn include_chain(&self) -> Vec<PathBuf> {
        let mut chain = self.parent.include_chain();
        chain.extend(self.overrides.include_path.iter().cloned());
        chain
    }
}
