// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The validated, typed form of a pipeline.
//!
//! Validation turns each textual input reference into an [`InputBinding`]: a typed
//! edge holding the producer's [`UnitId`] plus the field selector. The executor and
//! the input resolver work exclusively on these bindings, so a reference is parsed
//! once per pipeline no matter how many times it runs.

use std::collections::HashMap;

use crate::config::{Address, DependencyGraph, EntryPoints};
use crate::errors::ValidationError;
use crate::pipeline::{Pipeline, UnitBehavior};

/// Index of a unit within an [`ExecutionPlan`]. Ids follow unit-name order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub usize);

/// A resolved input edge: producer handle plus field selector.
#[derive(Debug, Clone)]
pub struct InputBinding {
    /// Local parameter name in the consumer's input record
    pub name: String,
    pub producer: UnitId,
    pub address: Address,
    pub required: bool,
}

impl InputBinding {
    pub fn producer_name(&self) -> &str {
        &self.address.unit_name
    }

    pub fn field(&self) -> &str {
        &self.address.field_name
    }
}

#[derive(Debug, Clone)]
pub struct PlannedUnit {
    pub id: UnitId,
    pub name: String,
    pub behavior: UnitBehavior,
    pub bindings: Vec<InputBinding>,
    /// Distinct producers this unit reads from
    pub dependencies: Vec<UnitId>,
    /// Units that read from this one, in name order
    pub dependents: Vec<UnitId>,
    /// True when at least one dependency is a router; such units only run when a
    /// router decision names them.
    pub consumes_router: bool,
}

impl PlannedUnit {
    pub fn is_router(&self) -> bool {
        self.behavior.is_router()
    }
}

#[derive(Debug)]
pub struct ExecutionPlan {
    units: Vec<PlannedUnit>,
    index: HashMap<String, UnitId>,
    entry_points: EntryPoints,
    terminal_units: Vec<String>,
    static_order: Option<Vec<UnitId>>,
}

impl ExecutionPlan {
    /// Assemble the plan for a pipeline that has already passed reference and cycle
    /// validation.
    pub(crate) fn build(
        pipeline: &Pipeline,
        graph: &DependencyGraph,
        entry_points: EntryPoints,
        terminal_units: Vec<String>,
        static_order: Option<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        let index: HashMap<String, UnitId> = pipeline
            .units()
            .enumerate()
            .map(|(i, unit)| (unit.name().to_string(), UnitId(i)))
            .collect();

        let lookup = |name: &str| -> Result<UnitId, ValidationError> {
            index.get(name).copied().ok_or_else(|| ValidationError::UnknownReference {
                unit: name.to_string(),
                reference: name.to_string(),
                missing_unit: name.to_string(),
            })
        };

        let dependents = graph.build_dependents();
        let is_router: Vec<bool> = pipeline.units().map(|u| u.is_router()).collect();
        let mut units = Vec::with_capacity(pipeline.len());

        for (i, unit) in pipeline.units().enumerate() {
            let mut bindings = Vec::with_capacity(unit.inputs().len());
            for input in unit.inputs() {
                let address = Address::parse(&input.source)?;
                bindings.push(InputBinding {
                    name: input.name.clone(),
                    producer: lookup(address.unit_name.as_str())?,
                    address,
                    required: input.required,
                });
            }

            let dependencies = graph
                .get_dependencies(unit.name())
                .map(|deps| deps.iter().map(|d| lookup(d.as_str())).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();

            let dependent_ids = dependents
                .get(unit.name())
                .map(|deps| deps.iter().map(|d| lookup(d.as_str())).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();

            let consumes_router = dependencies.iter().any(|dep| is_router[dep.0]);

            units.push(PlannedUnit {
                id: UnitId(i),
                name: unit.name().to_string(),
                behavior: unit.behavior().clone(),
                bindings,
                dependencies,
                dependents: dependent_ids,
                consumes_router,
            });
        }

        let static_order = static_order
            .map(|order| order.iter().map(|name| lookup(name.as_str())).collect::<Result<Vec<_>, _>>())
            .transpose()?;

        Ok(Self {
            units,
            index,
            entry_points,
            terminal_units,
            static_order,
        })
    }

    pub fn units(&self) -> &[PlannedUnit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> &PlannedUnit {
        &self.units[id.0]
    }

    pub fn id_of(&self, name: &str) -> Option<UnitId> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn entry_points(&self) -> &EntryPoints {
        &self.entry_points
    }

    /// Entry unit ids in name order
    pub fn entry_ids(&self) -> Vec<UnitId> {
        self.entry_points
            .iter()
            .filter_map(|name| self.id_of(name))
            .collect()
    }

    pub fn terminal_units(&self) -> &[String] {
        &self.terminal_units
    }

    /// Topological order, present only when the pipeline has no routers.
    pub fn static_order(&self) -> Option<&[UnitId]> {
        self.static_order.as_deref()
    }

    pub fn has_routers(&self) -> bool {
        self.units.iter().any(PlannedUnit::is_router)
    }

    pub fn names(&self, ids: &[UnitId]) -> Vec<String> {
        ids.iter().map(|id| self.unit(*id).name.clone()).collect()
    }
}
