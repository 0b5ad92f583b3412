// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod context;
pub mod ready_queue;
pub mod traversal;

pub use context::{
    BaseTraversalContext, CapturedOutput, ContextOverrides, DerivedContext, DiscardOutput,
    EmptyInput, FixedInput,
};
pub use traversal::traverse;
