// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Run start and completion
//! * Run aborts under the fail-fast policy
//! * Failures tolerated under `continue_on_error`
//! * Router decisions

use std::fmt::{Display, Formatter};
use std::time::Duration;

use tracing::Span;

use crate::observability::messages::StructuredLog;
use crate::observability::LogLevel;

/// Pipeline run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::engine::ExecutionStarted;
///
/// let msg = ExecutionStarted {
///     mode: "dynamic",
///     unit_count: 5,
///     max_concurrency: 4,
/// };
///
/// assert!(msg.to_string().contains("dynamic"));
/// ```
pub struct ExecutionStarted<'a> {
    pub mode: &'a str,
    pub unit_count: usize,
    pub max_concurrency: usize,
}

impl Display for ExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting pipeline execution in {} mode: {} units, max_concurrency={}",
            self.mode, self.unit_count, self.max_concurrency
        )
    }
}

impl StructuredLog for ExecutionStarted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn log(&self) {
        tracing::info!(
            mode = self.mode,
            unit_count = self.unit_count,
            max_concurrency = self.max_concurrency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution",
            span_name = name,
            mode = self.mode,
            unit_count = self.unit_count,
            max_concurrency = self.max_concurrency,
        )
    }
}

/// Pipeline run finished without being aborted.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExecutionCompleted {
    pub attempted: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl Display for ExecutionCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline execution completed: {} units attempted, {} failed, in {:?}",
            self.attempted, self.failed, self.duration
        )
    }
}

impl StructuredLog for ExecutionCompleted {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn log(&self) {
        tracing::info!(
            attempted = self.attempted,
            failed = self.failed,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_completed",
            span_name = name,
            attempted = self.attempted,
            failed = self.failed,
            duration = ?self.duration,
        )
    }
}

/// Pipeline run aborted because a unit failed and `continue_on_error` is off.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_switchyard::errors::UnitError;
/// use the_switchyard::observability::messages::engine::ExecutionAborted;
///
/// let error = UnitError::ExecutionTimeout { unit: "fetch".into(), timeout_ms: 30000 };
/// let msg = ExecutionAborted {
///     unit: "fetch",
///     error: &error,
/// };
///
/// assert!(msg.to_string().contains("'fetch'"));
/// ```
pub struct ExecutionAborted<'a> {
    pub unit: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExecutionAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline execution aborted at unit '{}': {}",
            self.unit, self.error
        )
    }
}

impl StructuredLog for ExecutionAborted<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn log(&self) {
        tracing::error!(
            unit = self.unit,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "execution_aborted",
            span_name = name,
            unit = self.unit,
            error = %self.error,
        )
    }
}

/// A unit failed but the run continues (`continue_on_error`).
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct UnitFailureTolerated<'a> {
    pub unit: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for UnitFailureTolerated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Continuing after failure of unit '{}': {}",
            self.unit, self.error
        )
    }
}

impl StructuredLog for UnitFailureTolerated<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Warn
    }

    fn log(&self) {
        tracing::warn!(
            unit = self.unit,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unit_failure_tolerated",
            span_name = name,
            unit = self.unit,
            error = %self.error,
        )
    }
}

/// A router chose its next units.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RouteSelected<'a> {
    pub router: &'a str,
    pub routes: &'a [String],
}

impl Display for RouteSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Router '{}' selected [{}]",
            self.router,
            self.routes.join(", ")
        )
    }
}

impl StructuredLog for RouteSelected<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Info
    }

    fn log(&self) {
        tracing::info!(
            router = self.router,
            routes = ?self.routes,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "route_selected",
            span_name = name,
            router = self.router,
            routes = ?self.routes,
        )
    }
}

/// A router named a unit that does not exist. The name is ignored.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
pub struct UnknownRouteIgnored<'a> {
    pub router: &'a str,
    pub route: &'a str,
}

impl Display for UnknownRouteIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Router '{}' selected unknown unit '{}'; ignoring",
            self.router, self.route
        )
    }
}

impl StructuredLog for UnknownRouteIgnored<'_> {
    fn level(&self) -> LogLevel {
        LogLevel::Warn
    }

    fn log(&self) {
        tracing::warn!(
            router = self.router,
            route = self.route,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unknown_route",
            span_name = name,
            router = self.router,
            route = self.route,
        )
    }
}
