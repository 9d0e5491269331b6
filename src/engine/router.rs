// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Router decision evaluation.

use crate::config::{ExecutionPlan, UnitId};

/// A router's decision split into units the plan knows and names it does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDecision {
    /// Known units, deduplicated, in decision order
    pub selected: Vec<UnitId>,
    /// Names with no matching unit; these are logged and ignored
    pub unknown: Vec<String>,
}

/// Map the names returned by a router onto the plan's units.
pub fn evaluate_decision(plan: &ExecutionPlan, names: &[String]) -> RouteDecision {
    let mut decision = RouteDecision::default();

    for name in names {
        match plan.id_of(name) {
            Some(id) if !decision.selected.contains(&id) => decision.selected.push(id),
            Some(_) => {}
            None => decision.unknown.push(name.clone()),
        }
    }

    decision
}
