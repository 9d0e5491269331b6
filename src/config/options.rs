// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

use serde::Deserialize;

use crate::config::consts::{DEFAULT_MAX_CONCURRENCY, DEFAULT_UNIT_TIMEOUT_MS};
use crate::observability::{LogLevel, Logger};

/// Run-time options for a pipeline execution.
///
/// Every field has a default, so an empty `options:` block (or none at all) in a
/// pipeline definition file yields [`ExecutionOptions::default`].
///
/// # Fields
/// * `unit_timeout_ms` - Time each unit may run before it fails with `ExecutionTimeout`
/// * `continue_on_error` - Keep scheduling after a unit fails instead of aborting
/// * `max_concurrency` - Upper bound on units running at the same time
/// * `logger` - Destination for engine log messages (not configurable from files)
///
/// # Example
/// ```yaml
/// options:
///   unit_timeout_ms: 5000
///   continue_on_error: true
///   max_concurrency: 4
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    pub unit_timeout_ms: u64,
    pub continue_on_error: bool,
    pub max_concurrency: usize,
    #[serde(skip)]
    pub logger: Logger,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            unit_timeout_ms: DEFAULT_UNIT_TIMEOUT_MS,
            continue_on_error: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            logger: Logger::default(),
        }
    }
}

impl ExecutionOptions {
    pub fn with_unit_timeout_ms(mut self, unit_timeout_ms: u64) -> Self {
        self.unit_timeout_ms = unit_timeout_ms;
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Route engine log messages to `sink` instead of `tracing`.
    pub fn with_logger<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str, LogLevel) + Send + Sync + 'static,
    {
        self.logger = Logger::custom(sink);
        self
    }

    /// Per-unit timeout. A zero setting is treated as one millisecond.
    pub fn unit_timeout(&self) -> Duration {
        Duration::from_millis(self.effective_timeout_ms())
    }

    pub(crate) fn effective_timeout_ms(&self) -> u64 {
        self.unit_timeout_ms.max(1)
    }

    /// Concurrency bound, never below one.
    pub fn concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }

    /// Check the numeric bounds: `unit_timeout_ms > 0` and `max_concurrency >= 1`.
    pub fn check(&self) -> Result<(), String> {
        if self.unit_timeout_ms == 0 {
            return Err("unit_timeout_ms must be greater than zero".to_string());
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}
