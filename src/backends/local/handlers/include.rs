// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The `include` node: run another graph document as a single node.
//!
//! The node's `path` input names the document. Every other input becomes the
//! nested graph's external input, and whatever the nested graph delivers
//! through its `output` nodes becomes this node's output. Logging, progress
//! reporting and handler lookup are inherited from the calling context.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::config::consts::INCLUDE_PATH_KEY;
use crate::config::{parse_graph, IncludeOptions, InputValues, OutputValues};
use crate::engine::{traverse, CapturedOutput, ContextOverrides, DerivedContext, FixedInput};
use crate::errors::{GraphLoadError, TraversalError};
use crate::observability::messages::include::{IncludeCompleted, IncludeStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::{NodeHandler, TraversalContext};

pub struct IncludeHandler {
    options: IncludeOptions,
}

impl IncludeHandler {
    pub fn new(options: IncludeOptions) -> Self {
        Self { options }
    }
}

fn load_failure(path: &str, source: impl Into<GraphLoadError>) -> TraversalError {
    TraversalError::GraphLoad {
        path: path.to_string(),
        source: source.into(),
    }
}

#[async_trait]
impl NodeHandler for IncludeHandler {
    async fn handle(
        &self,
        context: &dyn TraversalContext,
        mut inputs: InputValues,
    ) -> Result<OutputValues, TraversalError> {
        let path = match inputs.remove(INCLUDE_PATH_KEY) {
            Some(Value::String(path)) if !path.is_empty() => path,
            _ => return Err(TraversalError::MissingPath),
        };

        let mut chain = context.include_chain();
        let depth = chain.len() + 1;
        let max = self.options.get_max_depth();
        if depth > max {
            return Err(TraversalError::IncludeDepthExceeded { depth, max });
        }

        let resolved = self.options.resolve(&path);
        let canonical = tokio::fs::canonicalize(&resolved)
            .await
            .map_err(|e| load_failure(&path, e))?;

        if chain.contains(&canonical) {
            chain.push(canonical);
            return Err(TraversalError::IncludeCycle { chain });
        }

        let content = tokio::fs::read_to_string(&canonical)
            .await
            .map_err(|e| load_failure(&path, e))?;
        let graph = parse_graph(&content).map_err(|e| load_failure(&path, e))?;

        IncludeStarted {
            path: &path,
            forwarded_keys: inputs.len(),
            depth,
        }
        .log();
        let started = Instant::now();

        let captured = Arc::new(CapturedOutput::new());
        let nested = DerivedContext::new(
            context,
            ContextOverrides::new()
                .with_input_source(Arc::new(FixedInput::new(inputs)))
                .with_output_sink(captured.clone())
                .with_include_path(canonical),
        );

        traverse(&nested, &graph).await?;
        let outputs = captured.take();

        IncludeCompleted {
            path: &path,
            output_count: outputs.len(),
            duration: started.elapsed(),
        }
        .log();

        Ok(outputs)
    }

    fn name(&self) -> &'static str {
        "include"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HandlerRegistry;
    use crate::engine::BaseTraversalContext;
    use serde_json::json;

    fn context() -> BaseTraversalContext {
        BaseTraversalContext::new(HandlerRegistry::new())
    }

    #[tokio::test]
    async fn missing_or_empty_path_is_rejected() {
        let handler = IncludeHandler::new(IncludeOptions::default());

        for inputs in [
            InputValues::new(),
            InputValues::from([("path".to_string(), json!(""))]),
            InputValues::from([("path".to_string(), json!(7))]),
        ] {
            let result = handler.handle(&context(), inputs).await;
            assert!(matches!(result, Err(TraversalError::MissingPath)));
        }
    }

    #[tokio::test]
    async fn nonexistent_document_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let handler = IncludeHandler::new(IncludeOptions {
            max_depth: None,
            base_dir: Some(dir.path().to_path_buf()),
        });

        let result = handler
            .handle(&context(), InputValues::from([("path".to_string(), json!("absent.json"))]))
            .await;

        match result {
            Err(TraversalError::GraphLoad { path, source }) => {
                assert_eq!(path, "absent.json");
                assert!(matches!(source, GraphLoadError::Io(_)));
            }
            other => panic!("expected graph load failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn depth_limit_is_enforced_before_loading() {
        let handler = IncludeHandler::new(IncludeOptions {
            max_depth: Some(1),
            base_dir: None,
        });
        let ctx = context().with_root_path("/graphs/root.json".into());

        let result = handler
            .handle(&ctx, InputValues::from([("path".to_string(), json!("never-read.json"))]))
            .await;

        assert!(matches!(
            result,
            Err(TraversalError::IncludeDepthExceeded { depth: 2, max: 1 })
        ));
    }
}
