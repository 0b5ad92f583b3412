// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Engine code never formats ad-hoc log strings. Every diagnostic event is a
//! message struct from [`messages`] implementing `Display` and
//! [`messages::StructuredLog`], emitted through `tracing`. Installing a
//! subscriber is left to the binary (or to the embedding application).
//!
//! [`sinks`] holds the default implementations of the context's log and
//! progress capabilities, which route through the same `tracing` pipeline.

pub mod messages;
pub mod sinks;
