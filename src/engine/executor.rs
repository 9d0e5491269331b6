// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline executor: the orchestrator callers invoke.
//!
//! # Execution Flow
//!
//! 1. **Validation**: the pipeline's cached plan is built (or its cached failure
//!    returned) before anything runs
//! 2. **Scheduling**: a static schedule for router-free pipelines, a dynamic one
//!    otherwise
//! 3. **Execution Loop**: take a batch of ready units, resolve their inputs against
//!    the outputs recorded so far, launch them together, then settle them one by one
//!    in batch order
//! 4. **Failure Policy**: the first failure aborts the run unless
//!    `continue_on_error` is set, in which case it is logged and scheduling goes on
//!
//! All bookkeeping (recorded outputs, results, the schedule) lives on the task that
//! calls [`PipelineExecutor::execute`]. Unit bodies run on their own tasks and only
//! hand back their output, so there is a single writer and no locking.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use the_switchyard::config::ExecutionOptions;
//! use the_switchyard::engine::PipelineExecutor;
//! use the_switchyard::pipeline::{Pipeline, Unit};
//! use the_switchyard::traits::{Record, TransformFn};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = Unit::transform("source", TransformFn::new(|_inputs: Record| async move {
//!     let mut out = Record::new();
//!     out.insert("data".into(), json!("hello"));
//!     Ok(out)
//! }));
//! let processor = Unit::transform("processor", TransformFn::new(|inputs: Record| async move {
//!     let text = inputs["input"].as_str().unwrap_or_default().to_uppercase();
//!     let mut out = Record::new();
//!     out.insert("result".into(), json!(text));
//!     Ok(out)
//! }))
//! .with_input("input", "source:str:data");
//!
//! let pipeline = Pipeline::define(vec![source, processor])?;
//! let result = PipelineExecutor::new(ExecutionOptions::default())
//!     .execute(&pipeline)
//!     .await?;
//!
//! assert!(result.success);
//! assert_eq!(result.outputs["processor"]["result"], json!("HELLO"));
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::config::{ExecutionOptions, ExecutionPlan, UnitId};
use crate::engine::result::{PipelineResult, UnitOutput, UnitResult};
use crate::engine::router::evaluate_decision;
use crate::engine::schedule::Schedule;
use crate::engine::supervisor::Supervisor;
use crate::errors::{ExecutionError, ValidationError};
use crate::observability::messages::engine::{
    ExecutionAborted, ExecutionCompleted, ExecutionStarted, RouteSelected, UnitFailureTolerated,
    UnknownRouteIgnored,
};
use crate::observability::messages::validation::{
    CyclicDependencyDetected, ValidationCompleted, ValidationFailed, ValidationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::pipeline::Pipeline;
use crate::traits::Record;

/// Runs pipelines with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct PipelineExecutor {
    options: ExecutionOptions,
}

impl PipelineExecutor {
    pub fn new(options: ExecutionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Validate and run `pipeline`.
    ///
    /// Structural problems are returned as `Err` before any unit runs. Unit failures
    /// never are: they are recorded in the returned [`PipelineResult`], whose
    /// `error` names the failing unit when the run was aborted.
    pub async fn execute(&self, pipeline: &Pipeline) -> Result<PipelineResult, ValidationError> {
        let plan = self.validate(pipeline)?;
        Ok(self.run(&plan).await)
    }

    /// Fetch the pipeline's cached plan, reporting the outcome through the logger.
    ///
    /// The plan is computed once per pipeline, but its outcome is logged on every run.
    fn validate(&self, pipeline: &Pipeline) -> Result<Arc<ExecutionPlan>, ValidationError> {
        let logger = &self.options.logger;
        logger.emit(&ValidationStarted {
            unit_count: pipeline.len(),
        });

        match pipeline.plan() {
            Ok(plan) => {
                logger.emit(&ValidationCompleted {
                    entry_units: plan.entry_points().0.len(),
                    terminal_units: plan.terminal_units().len(),
                    has_routers: plan.has_routers(),
                });
                Ok(plan)
            }
            Err(error) => {
                if let ValidationError::CyclicDependency { cycle } = &error {
                    logger.emit(&CyclicDependencyDetected { cycle });
                }
                logger.emit(&ValidationFailed { error: &error });
                Err(error)
            }
        }
    }

    async fn run(&self, plan: &ExecutionPlan) -> PipelineResult {
        let schedule = Schedule::for_plan(plan);
        let started = ExecutionStarted {
            mode: schedule.mode(),
            unit_count: plan.len(),
            max_concurrency: self.options.concurrency(),
        };
        let span = started.span("pipeline_execution");
        self.options.logger.emit(&started);

        self.drive(plan, schedule).instrument(span).await
    }

    async fn drive(&self, plan: &ExecutionPlan, mut schedule: Schedule<'_>) -> PipelineResult {
        let started = Instant::now();
        let logger = &self.options.logger;
        let supervisor = Supervisor::new(self.options.effective_timeout_ms(), logger);
        let limit = self.options.concurrency();

        let mut produced: HashMap<UnitId, Record> = HashMap::new();
        let mut unit_results: Vec<UnitResult> = Vec::new();
        let mut error: Option<ExecutionError> = None;

        while error.is_none() {
            let batch = schedule.next_batch(limit);
            if batch.is_empty() {
                break;
            }

            let attempts: Vec<_> = batch
                .iter()
                .map(|id| supervisor.launch(plan.unit(*id), &produced))
                .collect();

            for attempt in attempts {
                let id = attempt.id();
                let result = supervisor.settle(attempt).await;
                let mut selected = Vec::new();

                match &result.outcome {
                    Ok(output) => {
                        if let UnitOutput::Routes(routes) = output {
                            selected = self.route(plan, &result.unit_name, routes);
                        }
                        produced.insert(id, output.to_record());
                    }
                    Err(unit_error) if self.options.continue_on_error => {
                        logger.emit(&UnitFailureTolerated {
                            unit: &result.unit_name,
                            error: unit_error,
                        });
                    }
                    Err(unit_error) => {
                        logger.emit(&ExecutionAborted {
                            unit: &result.unit_name,
                            error: unit_error,
                        });
                        // Units already launched in this batch still settle and are
                        // reported; the first failure is the one surfaced.
                        error.get_or_insert_with(|| ExecutionError::UnitFailed {
                            unit: result.unit_name.clone(),
                            source: unit_error.clone(),
                        });
                    }
                }

                schedule.settle(id, &selected);
                unit_results.push(result);
            }
        }

        let total_elapsed = started.elapsed();
        if error.is_none() {
            logger.emit(&ExecutionCompleted {
                attempted: unit_results.len(),
                failed: unit_results.iter().filter(|r| !r.success()).count(),
                duration: total_elapsed,
            });
        }

        let outputs: BTreeMap<String, Record> = produced
            .into_iter()
            .map(|(id, record)| (plan.unit(id).name.clone(), record))
            .collect();

        PipelineResult {
            success: error.is_none(),
            unit_results,
            outputs,
            total_elapsed,
            error,
        }
    }

    /// Log a router decision and return the known units it selected.
    fn route(&self, plan: &ExecutionPlan, router: &str, routes: &[String]) -> Vec<UnitId> {
        let logger = &self.options.logger;
        let decision = evaluate_decision(plan, routes);

        logger.emit(&RouteSelected { router, routes });
        for route in &decision.unknown {
            logger.emit(&UnknownRouteIgnored { router, route });
        }

        decision.selected
    }
}

/// Validate and run `pipeline` with `options`.
///
/// Shorthand for `PipelineExecutor::new(options).execute(pipeline)`.
pub async fn execute(
    pipeline: &Pipeline,
    options: ExecutionOptions,
) -> Result<PipelineResult, ValidationError> {
    PipelineExecutor::new(options).execute(pipeline).await
}
