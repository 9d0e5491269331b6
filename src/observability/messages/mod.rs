// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for consistent, human-readable output and
//! [`StructuredLog`] for emission through `tracing` with structured fields.
//!
//! # Organization
//!
//! * `engine` - pipeline run lifecycle, routing and failure policy events
//! * `unit` - per-unit execution and state transitions
//! * `validation` - graph validation events
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_switchyard::observability::messages::StructuredLog;
//! use the_switchyard::observability::messages::engine::ExecutionStarted;
//!
//! let msg = ExecutionStarted {
//!     mode: "static",
//!     unit_count: 5,
//!     max_concurrency: 1,
//! };
//!
//! msg.log();
//! ```

use std::fmt::Display;

use tracing::Span;

use crate::observability::LogLevel;

pub mod engine;
pub mod unit;
pub mod validation;

/// A log message that knows its level and its structured fields.
pub trait StructuredLog: Display {
    /// Level reported to caller-supplied loggers
    fn level(&self) -> LogLevel;

    /// Emit through `tracing` with structured fields
    fn log(&self);

    /// Open a span carrying the same fields
    fn span(&self, name: &str) -> Span;
}
