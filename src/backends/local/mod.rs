// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod handlers;

pub use factory::LocalHandlerFactory;
pub use handlers::*;
