// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while a pipeline is running.

use thiserror::Error;

/// Failure of a single unit during a run.
///
/// A `UnitError` is recorded on the unit's `UnitResult`. Whether it aborts the whole
/// run is decided by `ExecutionOptions::continue_on_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// A required input references a unit with no recorded output.
    #[error("Unit '{unit}' input '{input}' requires output of '{dependency}', which is not available")]
    UnresolvedDependency {
        unit: String,
        input: String,
        dependency: String,
    },

    /// A required input references a field the producer did not emit.
    #[error("Unit '{unit}' input '{input}' requires field '{field}' from '{dependency}', which was not produced")]
    MissingOutputField {
        unit: String,
        input: String,
        dependency: String,
        field: String,
    },

    /// The unit did not settle within the configured timeout.
    #[error("Unit '{unit}' timed out after {timeout_ms}ms")]
    ExecutionTimeout { unit: String, timeout_ms: u64 },

    /// The unit's own logic returned an error (or panicked).
    #[error("Unit '{unit}' failed: {message}")]
    UnitExecutionError { unit: String, message: String },
}

impl UnitError {
    /// Name of the unit this error belongs to.
    pub fn unit(&self) -> &str {
        match self {
            UnitError::UnresolvedDependency { unit, .. }
            | UnitError::MissingOutputField { unit, .. }
            | UnitError::ExecutionTimeout { unit, .. }
            | UnitError::UnitExecutionError { unit, .. } => unit,
        }
    }
}

/// Top-level error carried by a failed `PipelineResult`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The run was aborted because a unit failed and `continue_on_error` was off.
    #[error("Pipeline aborted: unit '{unit}' failed: {source}")]
    UnitFailed {
        unit: String,
        #[source]
        source: UnitError,
    },
}
