// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::{InputValues, OutputValues};
use crate::errors::TraversalError;
use crate::traits::{NodeHandler, TraversalContext};

/// Passthrough handler - outputs are exactly the inputs
pub struct PassthroughHandler;

#[async_trait]
impl NodeHandler for PassthroughHandler {
    async fn handle(
        &self,
        _context: &dyn TraversalContext,
        inputs: InputValues,
    ) -> Result<OutputValues, TraversalError> {
        Ok(inputs)
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
