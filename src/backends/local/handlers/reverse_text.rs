// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use super::required_text;
use crate::config::{InputValues, OutputValues};
use crate::errors::TraversalError;
use crate::traits::{NodeHandler, TraversalContext};

/// Reverse Text handler - reverses the `text` input, character by character
pub struct ReverseTextHandler;

#[async_trait]
impl NodeHandler for ReverseTextHandler {
    async fn handle(
        &self,
        _context: &dyn TraversalContext,
        inputs: InputValues,
    ) -> Result<OutputValues, TraversalError> {
        let text = required_text(&inputs, self.name(), "text")?;
        let reversed: String = text.chars().rev().collect();

        Ok(OutputValues::from([("text".to_string(), Value::String(reversed))]))
    }

    fn name(&self) -> &'static str {
        "reverse_text"
    }
}
