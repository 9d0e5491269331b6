// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution scheduling.
//!
//! A schedule hands out batches of units whose dependencies have all settled and is
//! told when each unit settles. It never runs anything itself; the executor drives
//! it from a single task, which is what keeps the bookkeeping free of locks.
//!
//! # Static schedule
//!
//! Used when the pipeline has no routers. Units are handed out strictly in the
//! plan's topological order. A batch is the longest run of consecutive units, up to
//! the concurrency limit, none of which depends on an unsettled unit.
//!
//! # Dynamic schedule
//!
//! Used when the pipeline has routers. Every unit keeps a counter of dependencies
//! that have not settled yet, and a unit is queued once it is *activated* and its
//! counter is zero:
//!
//! * entry units are activated at start
//! * activating a unit first activates everything it depends on
//! * when a unit settles, each dependent's counter drops by one; a dependent that
//!   does not read from a router is activated once its counter reaches zero
//! * a dependent of a router is activated only when a router decision names it
//!
//! Units that are never activated never run. The ready queue is FIFO and is always
//! fed in a fixed order (unit-name order, or router decision order), so a given
//! pipeline and set of decisions always yields the same sequence.

use std::collections::VecDeque;

use crate::config::{ExecutionPlan, UnitId};

/// Topological-order schedule for router-free pipelines.
#[derive(Debug)]
pub struct StaticSchedule<'p> {
    plan: &'p ExecutionPlan,
    order: Vec<UnitId>,
    cursor: usize,
    settled: Vec<bool>,
}

impl<'p> StaticSchedule<'p> {
    /// Returns `None` when the plan has no static order (it contains routers).
    pub fn new(plan: &'p ExecutionPlan) -> Option<Self> {
        let order = plan.static_order()?.to_vec();
        Some(Self {
            plan,
            order,
            cursor: 0,
            settled: vec![false; plan.len()],
        })
    }

    pub fn next_batch(&mut self, limit: usize) -> Vec<UnitId> {
        let mut batch = Vec::new();

        while batch.len() < limit.max(1) && self.cursor < self.order.len() {
            let id = self.order[self.cursor];
            let blocked = self
                .plan
                .unit(id)
                .dependencies
                .iter()
                .any(|dep| !self.settled[dep.0]);
            if blocked {
                break;
            }
            batch.push(id);
            self.cursor += 1;
        }

        batch
    }

    pub fn settle(&mut self, id: UnitId) {
        self.settled[id.0] = true;
    }
}

/// Ready-queue schedule for pipelines with routers.
#[derive(Debug)]
pub struct DynamicSchedule<'p> {
    plan: &'p ExecutionPlan,
    pending: Vec<usize>,
    activated: Vec<bool>,
    queued: Vec<bool>,
    ready: VecDeque<UnitId>,
}

impl<'p> DynamicSchedule<'p> {
    pub fn new(plan: &'p ExecutionPlan) -> Self {
        let mut schedule = Self {
            plan,
            pending: plan.units().iter().map(|u| u.dependencies.len()).collect(),
            activated: vec![false; plan.len()],
            queued: vec![false; plan.len()],
            ready: VecDeque::new(),
        };

        for id in plan.entry_ids() {
            schedule.activate(id);
        }

        schedule
    }

    /// Mark a unit as wanted, pulling in its dependencies first.
    ///
    /// Activating an already activated unit does nothing, so a unit is queued at
    /// most once.
    pub fn activate(&mut self, id: UnitId) {
        if self.activated[id.0] {
            return;
        }
        self.activated[id.0] = true;

        let plan = self.plan;
        for dep in &plan.unit(id).dependencies {
            self.activate(*dep);
        }

        self.enqueue_if_ready(id);
    }

    pub fn next_batch(&mut self, limit: usize) -> Vec<UnitId> {
        let take = limit.max(1).min(self.ready.len());
        self.ready.drain(..take).collect()
    }

    /// Record that `id` finished (successfully or not) and activate the units a
    /// router decision selected.
    pub fn settle(&mut self, id: UnitId, selected: &[UnitId]) {
        let plan = self.plan;

        for dependent in &plan.unit(id).dependents {
            let remaining = &mut self.pending[dependent.0];
            *remaining = remaining.saturating_sub(1);
            if *remaining > 0 {
                continue;
            }

            if self.activated[dependent.0] {
                self.enqueue_if_ready(*dependent);
            } else if !plan.unit(*dependent).consumes_router {
                self.activate(*dependent);
            }
        }

        for target in selected {
            self.activate(*target);
        }
    }

    pub fn is_activated(&self, id: UnitId) -> bool {
        self.activated[id.0]
    }

    fn enqueue_if_ready(&mut self, id: UnitId) {
        if self.pending[id.0] == 0 && !self.queued[id.0] {
            self.queued[id.0] = true;
            self.ready.push_back(id);
        }
    }
}

/// The schedule a plan runs under.
#[derive(Debug)]
pub enum Schedule<'p> {
    Static(StaticSchedule<'p>),
    Dynamic(DynamicSchedule<'p>),
}

impl<'p> Schedule<'p> {
    /// Static when the plan has a topological order, dynamic otherwise.
    pub fn for_plan(plan: &'p ExecutionPlan) -> Self {
        match StaticSchedule::new(plan) {
            Some(schedule) => Schedule::Static(schedule),
            None => Schedule::Dynamic(DynamicSchedule::new(plan)),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Schedule::Static(_) => "static",
            Schedule::Dynamic(_) => "dynamic",
        }
    }

    /// Up to `limit` units that may run now. Empty once nothing else can run.
    pub fn next_batch(&mut self, limit: usize) -> Vec<UnitId> {
        match self {
            Schedule::Static(schedule) => schedule.next_batch(limit),
            Schedule::Dynamic(schedule) => schedule.next_batch(limit),
        }
    }

    /// Record a settled unit. `selected` holds a router's known targets and is
    /// empty for transforms.
    pub fn settle(&mut self, id: UnitId, selected: &[UnitId]) {
        match self {
            Schedule::Static(schedule) => schedule.settle(id),
            Schedule::Dynamic(schedule) => schedule.settle(id, selected),
        }
    }
}
