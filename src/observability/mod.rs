// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout the engine. Message types follow a struct-based pattern with a
//! `Display` implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep log wording in one place per subsystem
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - pipeline run lifecycle, routing and failure policy events
//! * `messages::unit` - per-unit execution and state transitions
//! * `messages::validation` - graph validation events
//!
//! Messages reach their destination through a [`Logger`]. By default that is
//! `tracing` with structured fields; callers can install their own
//! `(message, level)` callback through `ExecutionOptions`.
//!
//! # Usage
//!
//! ```rust
//! use the_switchyard::observability::Logger;
//! use the_switchyard::observability::messages::engine::UnknownRouteIgnored;
//!
//! let logger = Logger::default();
//! logger.emit(&UnknownRouteIgnored {
//!     router: "classify",
//!     route: "nowhere",
//! });
//! ```

mod logger;
pub mod messages;

pub use logger::{LogFn, LogLevel, Logger};
