// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod change_text_case;
pub mod include;
pub mod passthrough;
pub mod prompt_template;
pub mod reverse_text;

pub use change_text_case::*;
pub use include::*;
pub use passthrough::*;
pub use prompt_template::*;
pub use reverse_text::*;

use crate::config::InputValues;
use crate::errors::TraversalError;

/// Read a required string input, failing the node if it is absent or not a string.
pub(crate) fn required_text<'a>(
    inputs: &'a InputValues,
    handler: &str,
    key: &str,
) -> Result<&'a str, TraversalError> {
    match inputs.get(key) {
        Some(value) => value
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("{}: input '{}' must be a string, got {}", handler, key, value).into()),
        None => Err(anyhow::anyhow!("{}: missing required input '{}'", handler, key).into()),
    }
}
