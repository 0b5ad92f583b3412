// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles for handlers, sinks and boundary endpoints.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::config::{InputValues, NodeDescriptor, OutputValues};
use crate::errors::TraversalError;
use crate::traits::{
    InputSource, LogSink, NodeHandler, OutputSink, ProgressCompletion, ProgressSink,
    TraversalContext,
};

/// Records the inputs of every invocation.
///
/// Clones share the same record, so one instance can be registered for a
/// node type and inspected afterwards. Returns its inputs unchanged unless
/// built with fixed outputs.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    invocations: Arc<Mutex<Vec<InputValues>>>,
    outputs: Option<OutputValues>,
}

impl RecordingHandler {
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn returning(outputs: OutputValues) -> Self {
        Self {
            invocations: Arc::default(),
            outputs: Some(outputs),
        }
    }

    pub fn invocations(&self) -> Vec<InputValues> {
        self.invocations.lock().unwrap().clone()
    }

    /// The `label` input of every invocation, in call order.
    pub fn labels(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .filter_map(|inputs| inputs.get("label"))
            .filter_map(|label| label.as_str().map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl NodeHandler for RecordingHandler {
    async fn handle(
        &self,
        _context: &dyn TraversalContext,
        inputs: InputValues,
    ) -> Result<OutputValues, TraversalError> {
        self.invocations.lock().unwrap().push(inputs.clone());
        Ok(self.outputs.clone().unwrap_or(inputs))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Succeeds without producing any output.
pub struct EmptyOutputHandler;

#[async_trait]
impl NodeHandler for EmptyOutputHandler {
    async fn handle(
        &self,
        _context: &dyn TraversalContext,
        _inputs: InputValues,
    ) -> Result<OutputValues, TraversalError> {
        Ok(OutputValues::new())
    }

    fn name(&self) -> &'static str {
        "empty"
    }
}

/// Always fails for testing failure scenarios
pub struct FailingHandler;

#[async_trait]
impl NodeHandler for FailingHandler {
    async fn handle(
        &self,
        _context: &dyn TraversalContext,
        _inputs: InputValues,
    ) -> Result<OutputValues, TraversalError> {
        Err(anyhow::anyhow!("simulated handler failure").into())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Sends its `message` input to the context log, then echoes its inputs.
pub struct LoggingHandler;

#[async_trait]
impl NodeHandler for LoggingHandler {
    async fn handle(
        &self,
        context: &dyn TraversalContext,
        inputs: InputValues,
    ) -> Result<OutputValues, TraversalError> {
        if let Some(message) = inputs.get("message").and_then(|m| m.as_str()) {
            context.log(message);
        }
        Ok(inputs)
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}

#[derive(Default)]
pub struct RecordingLogSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingLogSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl LogSink for RecordingLogSink {
    fn log(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Records started node ids and counts completion callbacks.
#[derive(Default)]
pub struct RecordingProgressSink {
    started: Mutex<Vec<String>>,
    completed: Arc<Mutex<usize>>,
}

impl RecordingProgressSink {
    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    pub fn completed(&self) -> usize {
        *self.completed.lock().unwrap()
    }
}

impl ProgressSink for RecordingProgressSink {
    fn node_started(&self, node: &NodeDescriptor) -> ProgressCompletion {
        self.started.lock().unwrap().push(node.id.clone());
        let completed = Arc::clone(&self.completed);
        Box::new(move || {
            *completed.lock().unwrap() += 1;
        })
    }
}

/// Fixed-value input source that records every request.
pub struct CountingInputSource {
    values: InputValues,
    requests: Mutex<Vec<Vec<String>>>,
}

impl CountingInputSource {
    pub fn new(values: InputValues) -> Self {
        Self {
            values,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Keys of every request, in call order.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InputSource for CountingInputSource {
    async fn request(&self, keys: &[String]) -> Result<InputValues, TraversalError> {
        self.requests.lock().unwrap().push(keys.to_vec());
        Ok(self.values.clone())
    }
}

/// Keeps every delivery separately, in order.
#[derive(Default)]
pub struct RecordingOutputSink {
    deliveries: Mutex<Vec<OutputValues>>,
}

impl RecordingOutputSink {
    pub fn deliveries(&self) -> Vec<OutputValues> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutputSink for RecordingOutputSink {
    async fn provide(&self, values: OutputValues) -> Result<(), TraversalError> {
        self.deliveries.lock().unwrap().push(values);
        Ok(())
    }
}
