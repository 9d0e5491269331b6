// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline validation events.
//!
//! This module contains message types for logging events related to:
//! * Validation start and completion
//! * Validation failures
//! * Cyclic dependency detection

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::errors::ValidationError;
use crate::observability::messages::StructuredLog;
use crate::observability::LogLevel;

/// Validation of a pipeline started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ValidationStarted {
    pub unit_count: usize,
}

impl Display for ValidationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Validating pipeline with {} units", self.unit_count)
    }
}

impl StructuredLog for ValidationStarted {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn log(&self) {
        tracing::info!(unit_count = self.unit_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "validation",
            span_name = name,
            unit_count = self.unit_count,
        )
    }
}

/// Validation succeeded and an execution plan was built.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::validation::ValidationCompleted;
///
/// let msg = ValidationCompleted {
///     entry_units: 1,
///     terminal_units: 2,
///     has_routers: true,
/// };
///
/// assert!(msg.to_string().contains("1 entry units"));
/// ```
pub struct ValidationCompleted {
    pub entry_units: usize,
    pub terminal_units: usize,
    pub has_routers: bool,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline validated: {} entry units, {} terminal units, routers={}",
            self.entry_units, self.terminal_units, self.has_routers
        )
    }
}

impl StructuredLog for ValidationCompleted {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn log(&self) {
        tracing::info!(
            entry_units = self.entry_units,
            terminal_units = self.terminal_units,
            has_routers = self.has_routers,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "validation_completed",
            span_name = name,
            entry_units = self.entry_units,
            terminal_units = self.terminal_units,
        )
    }
}

/// Validation rejected the pipeline.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ValidationFailed<'a> {
    pub error: &'a ValidationError,
}

impl Display for ValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline validation failed: {}", self.error)
    }
}

impl StructuredLog for ValidationFailed<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("validation_failed", span_name = name, error = %self.error)
    }
}

/// Cyclic dependency detected among the units.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::validation::CyclicDependencyDetected;
///
/// let cycle = vec!["a".to_string(), "b".to_string(), "a".to_string()];
/// let msg = CyclicDependencyDetected { cycle: &cycle };
///
/// assert_eq!(msg.to_string(), "Cyclic dependency detected: a -> b -> a");
/// ```
pub struct CyclicDependencyDetected<'a> {
    pub cycle: &'a [String],
}

impl Display for CyclicDependencyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic dependency detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicDependencyDetected<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "cyclic_dependency",
            span_name = name,
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
        )
    }
}
