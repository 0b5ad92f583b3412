// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::required_text;
use crate::config::{InputValues, OutputValues};
use crate::errors::TraversalError;
use crate::traits::{NodeHandler, TraversalContext};

/// Case conversion selected by the `mode` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    Upper,
    Lower,
    /// First letter of each word capitalized
    Proper,
    /// Like proper, but short articles and prepositions stay lowercase after the first word
    Title,
}

const TITLE_SMALL_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

impl CaseMode {
    pub fn apply(self, input: &str) -> String {
        match self {
            CaseMode::Upper => input.to_uppercase(),
            CaseMode::Lower => input.to_lowercase(),
            CaseMode::Proper => input
                .split_whitespace()
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            CaseMode::Title => input
                .split_whitespace()
                .enumerate()
                .map(|(i, word)| {
                    let lower_word = word.to_lowercase();
                    if i == 0 || !TITLE_SMALL_WORDS.contains(&lower_word.as_str()) {
                        capitalize(word)
                    } else {
                        lower_word
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Change Text Case handler - converts `text` according to `mode`
pub struct ChangeTextCaseHandler;

#[async_trait]
impl NodeHandler for ChangeTextCaseHandler {
    async fn handle(
        &self,
        _context: &dyn TraversalContext,
        inputs: InputValues,
    ) -> Result<OutputValues, TraversalError> {
        let text = required_text(&inputs, self.name(), "text")?;
        let mode_value = inputs
            .get("mode")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{}: missing required input 'mode'", self.name()))?;
        let mode: CaseMode = serde_json::from_value(mode_value.clone()).map_err(|_| {
            anyhow::anyhow!(
                "{}: unknown mode {} (expected upper, lower, proper or title)",
                self.name(),
                mode_value
            )
        })?;

        Ok(OutputValues::from([(
            "text".to_string(),
            Value::String(mode.apply(text)),
        )]))
    }

    fn name(&self) -> &'static str {
        "change_text_case"
    }
}
