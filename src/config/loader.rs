// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::consts::{DEFAULT_LOG_FILTER, DEFAULT_MAX_INCLUDE_DEPTH};
use crate::config::GraphDescriptor;
use crate::errors::{ConfigError, GraphLoadError};

/// Engine-wide configuration.
///
/// Loaded from a YAML file by the binary; library users can build it directly
/// or rely on `EngineConfig::default()`.
///
/// # Example
/// ```yaml
/// include:
///   max_depth: 16
///   base_dir: ./graphs
/// log_filter: boardwalk=debug
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub include: IncludeOptions,
    pub log_filter: Option<String>,
}

impl EngineConfig {
    /// Tracing filter directive, using the built-in default if not configured.
    pub fn get_log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

/// Options for the `include` node handler.
///
/// # Fields
/// * `max_depth` - Maximum nesting depth of included graphs (defaults to 32)
/// * `base_dir` - Directory relative include paths are resolved against
///   (defaults to the process working directory)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncludeOptions {
    pub max_depth: Option<usize>,
    pub base_dir: Option<PathBuf>,
}

impl IncludeOptions {
    pub fn get_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_INCLUDE_DEPTH)
    }

    /// Resolve an include path. Absolute paths are returned unchanged.
    ///
    /// ```
    /// use boardwalk::config::IncludeOptions;
    /// use std::path::PathBuf;
    ///
    /// let options = IncludeOptions { max_depth: None, base_dir: Some(PathBuf::from("/graphs")) };
    /// assert_eq!(options.resolve("nested/g.json"), PathBuf::from("/graphs/nested/g.json"));
    /// assert_eq!(options.resolve("/abs/g.json"), PathBuf::from("/abs/g.json"));
    /// ```
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Parse a graph document held in memory.
///
/// Only the document's shape is checked here. Structural defects such as
/// cycles are reported by `traverse` (or by calling
/// [`crate::config::validate_graph`] directly).
pub fn parse_graph(content: &str) -> Result<GraphDescriptor, GraphLoadError> {
    let graph: GraphDescriptor = serde_json::from_str(content)?;
    Ok(graph)
}

/// Load a graph document from a JSON file.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<GraphDescriptor, GraphLoadError> {
    let content = fs::read_to_string(path)?;
    parse_graph(&content)
}

/// Load engine configuration from a YAML file.
pub fn load_engine_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: EngineConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}
