// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::{InputValues, OutputValues};
use crate::errors::TraversalError;
use crate::traits::TraversalContext;

/// Executes nodes of one type.
///
/// The traversal passes the running context explicitly, so a handler can log,
/// report progress, resolve other handlers, or start a nested traversal of its
/// own (as `include` does) without any shared state.
#[async_trait]
pub trait NodeHandler: Send + Sync {
    async fn handle(
        &self,
        context: &dyn TraversalContext,
        inputs: InputValues,
    ) -> Result<OutputValues, TraversalError>;

    fn name(&self) -> &'static str;
}
