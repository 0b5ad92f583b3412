// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use super::required_text;
use crate::config::{InputValues, OutputValues};
use crate::errors::TraversalError;
use crate::traits::{NodeHandler, TraversalContext};

/// Prompt Template handler - fills `{{key}}` placeholders in `template`.
///
/// Every input other than `template` is available as a placeholder value.
/// String values are substituted verbatim; anything else is substituted as
/// compact JSON. The rendered text is the `prompt` output.
pub struct PromptTemplateHandler;

impl PromptTemplateHandler {
    pub fn render(template: &str, values: &InputValues) -> Result<String, TraversalError> {
        let mut rendered = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            rendered.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or_else(|| anyhow::anyhow!("prompt_template: unterminated placeholder"))?;

            let key = after_open[..close].trim();
            match values.get(key) {
                Some(Value::String(s)) => rendered.push_str(s),
                Some(other) => rendered.push_str(&other.to_string()),
                None => {
                    return Err(anyhow::anyhow!("prompt_template: no value for placeholder '{}'", key).into())
                }
            }
            rest = &after_open[close + 2..];
        }
        rendered.push_str(rest);

        Ok(rendered)
    }
}

#[async_trait]
impl NodeHandler for PromptTemplateHandler {
    async fn handle(
        &self,
        _context: &dyn TraversalContext,
        inputs: InputValues,
    ) -> Result<OutputValues, TraversalError> {
        let template = required_text(&inputs, self.name(), "template")?;
        let prompt = Self::render(template, &inputs)?;

        Ok(OutputValues::from([("prompt".to_string(), Value::String(prompt))]))
    }

    fn name(&self) -> &'static str {
        "prompt_template"
    }
}
