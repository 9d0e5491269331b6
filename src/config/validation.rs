// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline validation for graph integrity and executability.
//!
//! Validation runs in a fixed order so that each check can rely on the previous one:
//!
//! 1. **Non-empty**: a pipeline needs at least one unit
//! 2. **Reference Validation**: every input source parses and names another, existing unit
//! 3. **Cycle Detection**: DFS over the dependency graph
//! 4. **Entry Units**: at least one unit declares no inputs
//!
//! On success the validated graph is turned into an [`ExecutionPlan`].
//!
//! # Algorithms
//!
//! ## Cycle Detection
//! Uses **Depth-First Search (DFS) with a recursion stack**. An edge runs from a unit
//! to each unit it reads from. Meeting a unit that is still on the stack closes a
//! cycle, which is reported as the stack segment from that unit plus the unit
//! itself, e.g. `[a, b, a]`. Units whose traversal finished are never revisited.
//!
//! ## Static Order
//! Post-order DFS over the same edges: a unit is emitted only after all of its
//! dependencies, which yields a topological order. Roots are taken in unit-name
//! order, so the result does not depend on the order units were declared in.
//!
//! # Examples
//!
//! ```rust
//! use the_switchyard::config::validate;
//! use the_switchyard::errors::ValidationError;
//! use the_switchyard::pipeline::{Pipeline, Unit};
//! use the_switchyard::traits::{Record, TransformFn};
//!
//! let unit = |name: &str| Unit::transform(name, TransformFn::new(|r: Record| async move { Ok(r) }));
//!
//! let pipeline = Pipeline::define(vec![
//!     unit("a").with_input("x", "b:any:out"),
//!     unit("b").with_input("x", "a:any:out"),
//!     unit("c"),
//! ]).unwrap();
//!
//! match validate(&pipeline) {
//!     Err(ValidationError::CyclicDependency { cycle }) => {
//!         assert_eq!(cycle, vec!["a", "b", "a"]);
//!     }
//!     other => panic!("expected a cycle, got {:?}", other),
//! }
//! ```

use std::collections::HashSet;

use crate::config::{Address, DependencyGraph, EntryPoints, ExecutionPlan};
use crate::errors::ValidationError;
use crate::pipeline::Pipeline;

/// Validate a pipeline and build its execution plan.
///
/// Fails with `EmptyPipeline` when there are no units; otherwise runs reference
/// validation, then cycle detection, then requires at least one entry unit. The
/// first failure is returned. Nothing is logged here; the executor reports the
/// outcome through its logger on every run.
pub fn validate(pipeline: &Pipeline) -> Result<ExecutionPlan, ValidationError> {
    build_plan(pipeline)
}

fn build_plan(pipeline: &Pipeline) -> Result<ExecutionPlan, ValidationError> {
    if pipeline.is_empty() {
        return Err(ValidationError::EmptyPipeline);
    }

    validate_references(pipeline)?;

    let graph = DependencyGraph::from_pipeline(pipeline)?;
    detect_cycles(&graph)?;

    let entry_points = find_entry_units(pipeline);
    if entry_points.is_empty() {
        return Err(ValidationError::NoEntryUnit);
    }

    let terminal_units = find_terminal_units(&graph);
    let static_order = if pipeline.has_routers() {
        None
    } else {
        Some(static_execution_order(&graph))
    };

    ExecutionPlan::build(pipeline, &graph, entry_points, terminal_units, static_order)
}

/// Validates that every input source parses and names another unit of the pipeline.
///
/// Units are checked in name order and inputs in declaration order; the first
/// problem found is returned.
///
/// # Errors
///
/// * `MalformedReference` - a source does not match `name:type:field`
/// * `UnknownReference` - the referenced unit is not part of the pipeline
/// * `SelfReference` - a unit references its own output
pub fn validate_references(pipeline: &Pipeline) -> Result<(), ValidationError> {
    for unit in pipeline.units() {
        for input in unit.inputs() {
            let address = Address::parse(&input.source)?;

            if !pipeline.contains(&address.unit_name) {
                return Err(ValidationError::UnknownReference {
                    unit: unit.name().to_string(),
                    reference: input.source.clone(),
                    missing_unit: address.unit_name,
                });
            }

            if address.unit_name == unit.name() {
                return Err(ValidationError::SelfReference {
                    unit: unit.name().to_string(),
                    reference: input.source.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Detect dependency cycles using DFS with a recursion stack.
///
/// Dependencies that are not keys of the graph are treated as leaves, so this can
/// run on a graph whose references have not been validated.
///
/// # Example Execution
/// For `a -> b -> c -> a` (each unit reading from the next):
/// 1. Start DFS at `a`: path = [a]
/// 2. Visit `b`: path = [a, b]
/// 3. Visit `c`: path = [a, b, c]
/// 4. `a` is still on the stack, so the cycle is [a, b, c, a]
pub fn detect_cycles(graph: &DependencyGraph) -> Result<(), ValidationError> {
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for unit in graph.keys() {
        if !visited.contains(unit.as_str()) {
            if let Some(cycle) =
                dfs_cycle_detection(unit, graph, &mut visited, &mut rec_stack, &mut path)
            {
                return Err(ValidationError::CyclicDependency { cycle });
            }
        }
    }

    Ok(())
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &'a DependencyGraph,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(dependencies) = graph.get_dependencies(node) {
        for dependency in dependencies {
            let dependency = dependency.as_str();
            if rec_stack.contains(dependency) {
                let cycle_start = path.iter().position(|n| *n == dependency).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[cycle_start..].iter().map(|n| n.to_string()).collect();
                cycle.push(dependency.to_string());
                return Some(cycle);
            }
            if !visited.contains(dependency) {
                if let Some(cycle) = dfs_cycle_detection(dependency, graph, visited, rec_stack, path)
                {
                    return Some(cycle);
                }
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}

/// Topological order of an acyclic graph: every unit follows all of its dependencies.
///
/// Only meaningful for pipelines without routers; the executor uses it as the static
/// schedule.
pub fn static_execution_order(graph: &DependencyGraph) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut order = Vec::with_capacity(graph.len());

    for unit in graph.keys() {
        post_order_visit(unit, graph, &mut visited, &mut order);
    }

    order
}

fn post_order_visit<'a>(
    node: &'a str,
    graph: &'a DependencyGraph,
    visited: &mut HashSet<&'a str>,
    order: &mut Vec<String>,
) {
    if !visited.insert(node) {
        return;
    }

    if let Some(dependencies) = graph.get_dependencies(node) {
        for dependency in dependencies {
            post_order_visit(dependency, graph, visited, order);
        }
    }

    order.push(node.to_string());
}

/// Units with no declared inputs, in name order.
pub fn find_entry_units(pipeline: &Pipeline) -> EntryPoints {
    let mut entry_points = EntryPoints::new();
    for unit in pipeline.units().filter(|unit| unit.is_entry()) {
        entry_points.add(unit.name().to_string());
    }
    entry_points
}

/// Units that no other unit reads from, in name order.
pub fn find_terminal_units(graph: &DependencyGraph) -> Vec<String> {
    let referenced: HashSet<&str> = graph
        .0
        .values()
        .flat_map(|dependencies| dependencies.iter().map(String::as_str))
        .collect();

    graph
        .keys()
        .filter(|unit| !referenced.contains(unit.as_str()))
        .cloned()
        .collect()
}
