// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while reading graph documents and engine configuration from disk.

use thiserror::Error;

use crate::errors::ValidationError;

/// Failure to read or parse a graph document into a [`crate::config::GraphDescriptor`].
#[derive(Error, Debug)]
pub enum GraphLoadError {
    /// The document could not be read.
    #[error("unable to read graph document: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a well-formed graph description.
    #[error("malformed graph document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to load an [`crate::config::EngineConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read engine config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed engine config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
