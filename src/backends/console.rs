// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Terminal-backed external input for the `boardwalk` binary.

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

use crate::config::InputValues;
use crate::errors::TraversalError;
use crate::traits::InputSource;

/// Interpret a command-line or prompted value.
///
/// Valid JSON is taken as JSON; anything else is a plain string.
///
/// ```
/// use boardwalk::backends::console::parse_cli_value;
/// use serde_json::json;
///
/// assert_eq!(parse_cli_value("42"), json!(42));
/// assert_eq!(parse_cli_value("[1, 2]"), json!([1, 2]));
/// assert_eq!(parse_cli_value("hello world"), json!("hello world"));
/// ```
pub fn parse_cli_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Answers input requests from preset values, prompting on stdin for the rest.
pub struct ConsoleInput {
    preset: InputValues,
    stdin: Mutex<BufReader<Stdin>>,
}

impl ConsoleInput {
    pub fn new(preset: InputValues) -> Self {
        Self {
            preset,
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

fn boundary(e: std::io::Error) -> TraversalError {
    TraversalError::Boundary(format!("console input: {}", e))
}

#[async_trait]
impl InputSource for ConsoleInput {
    async fn request(&self, keys: &[String]) -> Result<InputValues, TraversalError> {
        let mut values = self.preset.clone();
        let mut stdin = self.stdin.lock().await;
        let mut stdout = tokio::io::stdout();

        for key in keys.iter().filter(|k| !self.preset.contains_key(*k)) {
            stdout
                .write_all(format!("{}: ", key).as_bytes())
                .await
                .map_err(boundary)?;
            stdout.flush().await.map_err(boundary)?;

            let mut line = String::new();
            let read = stdin.read_line(&mut line).await.map_err(boundary)?;
            if read == 0 {
                return Err(TraversalError::Boundary(format!(
                    "console input: stdin closed before a value for '{}' was entered",
                    key
                )));
            }
            values.insert(key.clone(), parse_cli_value(line.trim_end_matches(['\r', '\n'])));
        }

        Ok(values)
    }
}
