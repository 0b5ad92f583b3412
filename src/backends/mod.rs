// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node handler backends and boundary endpoints.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process Rust handlers registered under their type tag:
//! - **Composition**: `include` runs another graph document as one node
//! - **Text Transformation**: `reverse_text`, `change_text_case`
//! - **Templating**: `prompt_template` fills `{{key}}` placeholders
//! - **Plumbing**: `passthrough`
//!
//! ## Console Backend
//! Terminal input for the `boardwalk` binary: preset `key=value` pairs with a
//! stdin prompt for whatever the graph's `input` nodes still need.
//!
//! ## Stub Backend (Test-Only)
//! Recording handlers, sinks and boundary endpoints for engine tests. Only
//! available in test builds.
//!
//! # Architecture
//!
//! ```text
//! EngineConfig → LocalHandlerFactory → HandlerRegistry → TraversalContext
//! ```
//!
//! # Examples
//!
//! ```rust
//! use boardwalk::backends::local::LocalHandlerFactory;
//! use boardwalk::config::IncludeOptions;
//!
//! let handler = LocalHandlerFactory::create_handler("change_text_case", &IncludeOptions::default())?;
//! assert_eq!(handler.name(), "change_text_case");
//! # Ok::<(), String>(())
//! ```

pub mod console;
pub mod local;
#[cfg(test)]
pub mod stub;
