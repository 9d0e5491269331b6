// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod dependency_graph;
mod entry_points;
mod loader;
mod options;
mod plan;
mod reference;
mod validation;

pub mod consts;

pub use dependency_graph::DependencyGraph;
pub use entry_points::EntryPoints;
pub use loader::{
    load_and_validate_pipeline, load_pipeline_definition, PipelineDefinition, UnitDefinition,
};
pub use options::ExecutionOptions;
pub use plan::{ExecutionPlan, InputBinding, PlannedUnit, UnitId};
pub use reference::Address;
pub use validation::{
    detect_cycles, find_entry_units, find_terminal_units, static_execution_order, validate,
    validate_references,
};
