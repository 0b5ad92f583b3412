// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod load;
mod traversal;

pub use config::ValidationError;
pub use load::{ConfigError, GraphLoadError};
pub use traversal::TraversalError;
