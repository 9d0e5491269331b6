// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for unit execution and lifecycle events.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use tracing::Span;

use crate::engine::UnitState;
use crate::observability::messages::StructuredLog;
use crate::observability::LogLevel;

/// Unit execution started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::unit::UnitExecutionStarted;
///
/// let msg = UnitExecutionStarted {
///     unit: "uppercase",
///     kind: "transform",
///     input_count: 1,
/// };
///
/// assert_eq!(msg.to_string(), "Unit 'uppercase' (transform) started with 1 inputs");
/// ```
pub struct UnitExecutionStarted<'a> {
    pub unit: &'a str,
    pub kind: &'a str,
    pub input_count: usize,
}

impl Display for UnitExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unit '{}' ({}) started with {} inputs",
            self.unit, self.kind, self.input_count
        )
    }
}

impl StructuredLog for UnitExecutionStarted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn log(&self) {
        tracing::info!(
            unit = self.unit,
            kind = self.kind,
            input_count = self.input_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "unit_execution",
            span_name = name,
            unit = self.unit,
            kind = self.kind,
        )
    }
}

/// Unit execution completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
pub struct UnitExecutionCompleted<'a> {
    pub unit: &'a str,
    pub output_fields: usize,
    pub duration: Duration,
}

impl Display for UnitExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unit '{}' completed: {} output fields, duration={:?}",
            self.unit, self.output_fields, self.duration
        )
    }
}

impl StructuredLog for UnitExecutionCompleted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn log(&self) {
        tracing::info!(
            unit = self.unit,
            output_fields = self.output_fields,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "unit_completed",
            span_name = name,
            unit = self.unit,
            duration = ?self.duration,
        )
    }
}

/// Unit execution failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnitExecutionFailed<'a> {
    pub unit: &'a str,
    pub error: &'a dyn std::error::Error,
    pub duration: Duration,
}

impl Display for UnitExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unit '{}' failed after {:?}: {}",
            self.unit, self.duration, self.error
        )
    }
}

impl StructuredLog for UnitExecutionFailed<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn log(&self) {
        tracing::error!(
            unit = self.unit,
            error = %self.error,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "unit_failed",
            span_name = name,
            unit = self.unit,
            error = %self.error,
        )
    }
}

/// Unit moved between lifecycle states.
///
/// # Log Level
/// `debug!` - Always emitted through `tracing`, even when a custom logger is set
pub struct UnitStateChanged<'a> {
    pub unit: &'a str,
    pub state: UnitState,
}

impl Display for UnitStateChanged<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Unit '{}' is {}", self.unit, self.state)
    }
}

impl StructuredLog for UnitStateChanged<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn log(&self) {
        tracing::debug!(
            unit = self.unit,
            state = %self.state,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "unit_state",
            span_name = name,
            unit = self.unit,
            state = %self.state,
        )
    }
}
