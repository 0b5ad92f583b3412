// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // node handlers + boundary endpoints
pub mod config;     // graph descriptors, engine config, registry
pub mod engine;     // traversal + contexts
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // handler and context abstractions
