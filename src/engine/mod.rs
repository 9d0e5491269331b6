// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod executor;
pub mod resolver;
pub mod result;
pub mod router;
pub mod schedule;
pub mod supervisor;
#[cfg(test)]
mod integration_tests;

pub use executor::{execute, PipelineExecutor};
pub use resolver::resolve_inputs;
pub use result::{PipelineReport, PipelineResult, UnitOutput, UnitReport, UnitResult};
pub use router::{evaluate_decision, RouteDecision};
pub use schedule::Schedule;
pub use supervisor::{FailureKind, UnitState};
