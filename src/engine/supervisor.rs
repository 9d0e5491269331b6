// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-unit supervision: input resolution, launch, timeout and bookkeeping.
//!
//! A unit moves through
//! `Pending -> ResolvingInputs -> Running -> Succeeded | Failed(Timeout) | Failed(Error)`.
//! Its behavior runs on its own tokio task. The supervisor waits for that task until
//! the unit's deadline; if the deadline passes first the task is detached, not
//! aborted, and whatever it eventually produces is dropped.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::config::{PlannedUnit, UnitId};
use crate::engine::resolver::resolve_inputs;
use crate::engine::result::{UnitOutput, UnitResult};
use crate::errors::UnitError;
use crate::observability::messages::unit::{
    UnitExecutionCompleted, UnitExecutionFailed, UnitExecutionStarted, UnitStateChanged,
};
use crate::observability::messages::StructuredLog;
use crate::observability::Logger;
use crate::pipeline::UnitBehavior;
use crate::traits::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Error,
}

/// Lifecycle state of a unit within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    Pending,
    ResolvingInputs,
    Running,
    Succeeded,
    Failed(FailureKind),
}

impl UnitState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UnitState::Succeeded | UnitState::Failed(_))
    }

    fn for_outcome(outcome: &Result<UnitOutput, UnitError>) -> Self {
        match outcome {
            Ok(_) => UnitState::Succeeded,
            Err(UnitError::ExecutionTimeout { .. }) => UnitState::Failed(FailureKind::Timeout),
            Err(_) => UnitState::Failed(FailureKind::Error),
        }
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnitState::Pending => "pending",
            UnitState::ResolvingInputs => "resolving_inputs",
            UnitState::Running => "running",
            UnitState::Succeeded => "succeeded",
            UnitState::Failed(FailureKind::Timeout) => "failed(timeout)",
            UnitState::Failed(FailureKind::Error) => "failed(error)",
        };
        f.write_str(label)
    }
}

type UnitTask = JoinHandle<(anyhow::Result<UnitOutput>, Instant)>;

/// A unit that has been launched (or failed before it could be).
pub(crate) struct Attempt<'p> {
    unit: &'p PlannedUnit,
    started: Instant,
    state: Result<(UnitTask, tokio::time::Instant), UnitError>,
}

impl Attempt<'_> {
    pub(crate) fn id(&self) -> UnitId {
        self.unit.id
    }
}

pub(crate) struct Supervisor<'a> {
    timeout: Duration,
    timeout_ms: u64,
    logger: &'a Logger,
}

impl<'a> Supervisor<'a> {
    pub(crate) fn new(timeout_ms: u64, logger: &'a Logger) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            timeout_ms,
            logger,
        }
    }

    /// Resolve the unit's inputs from `produced` and spawn its behavior.
    ///
    /// The unit's deadline starts now, so units launched together in a batch each get
    /// their full timeout regardless of the order they are awaited in.
    pub(crate) fn launch<'p>(
        &self,
        unit: &'p PlannedUnit,
        produced: &HashMap<UnitId, Record>,
    ) -> Attempt<'p> {
        let started = Instant::now();
        transition(unit, UnitState::Pending);
        transition(unit, UnitState::ResolvingInputs);

        let state = resolve_inputs(&unit.name, &unit.bindings, produced).map(|inputs| {
            self.logger.emit(&UnitExecutionStarted {
                unit: &unit.name,
                kind: unit.behavior.kind(),
                input_count: inputs.len(),
            });
            transition(unit, UnitState::Running);

            let deadline = tokio::time::Instant::now() + self.timeout;
            (spawn_behavior(unit.behavior.clone(), inputs), deadline)
        });

        Attempt {
            unit,
            started,
            state,
        }
    }

    /// Wait for a launched unit to settle and record its result.
    pub(crate) async fn settle(&self, attempt: Attempt<'_>) -> UnitResult {
        let Attempt {
            unit,
            started,
            state,
        } = attempt;

        let (outcome, elapsed) = match state {
            Err(error) => (Err(error), started.elapsed()),
            Ok((task, deadline)) => self.wait(unit, task, deadline, started).await,
        };

        match &outcome {
            Ok(output) => self.logger.emit(&UnitExecutionCompleted {
                unit: &unit.name,
                output_fields: output.as_record().map_or(0, Record::len),
                duration: elapsed,
            }),
            Err(error) => self.logger.emit(&UnitExecutionFailed {
                unit: &unit.name,
                error,
                duration: elapsed,
            }),
        }
        transition(unit, UnitState::for_outcome(&outcome));

        UnitResult {
            unit_name: unit.name.clone(),
            outcome,
            elapsed,
        }
    }

    async fn wait(
        &self,
        unit: &PlannedUnit,
        task: UnitTask,
        deadline: tokio::time::Instant,
        started: Instant,
    ) -> (Result<UnitOutput, UnitError>, Duration) {
        match tokio::time::timeout_at(deadline, task).await {
            Ok(Ok((Ok(output), finished))) => (Ok(output), finished.duration_since(started)),
            Ok(Ok((Err(error), finished))) => (
                Err(UnitError::UnitExecutionError {
                    unit: unit.name.clone(),
                    message: format!("{:#}", error),
                }),
                finished.duration_since(started),
            ),
            Ok(Err(join_error)) => (
                Err(UnitError::UnitExecutionError {
                    unit: unit.name.clone(),
                    message: format!("unit task did not complete: {}", join_error),
                }),
                started.elapsed(),
            ),
            Err(_elapsed) => (
                Err(UnitError::ExecutionTimeout {
                    unit: unit.name.clone(),
                    timeout_ms: self.timeout_ms,
                }),
                started.elapsed(),
            ),
        }
    }
}

fn spawn_behavior(behavior: UnitBehavior, inputs: Record) -> UnitTask {
    tokio::spawn(async move {
        let result = match behavior {
            UnitBehavior::Transform(transform) => {
                transform.transform(inputs).await.map(UnitOutput::Record)
            }
            UnitBehavior::Router(router) => router.route(inputs).await.map(UnitOutput::Routes),
        };
        (result, Instant::now())
    })
}

fn transition(unit: &PlannedUnit, state: UnitState) {
    UnitStateChanged {
        unit: &unit.name,
        state,
    }
    .log();
}
